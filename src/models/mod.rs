// src/models/mod.rs

pub mod survey;
