// src/utils/mod.rs

pub mod auth;
pub mod format;
pub mod public_id;
pub mod validation;
