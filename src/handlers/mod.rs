// src/handlers/mod.rs

pub mod feedback;
pub mod survey;
