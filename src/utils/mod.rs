// src/utils/mod.rs

pub mod html;
pub mod link;
pub mod qr;
