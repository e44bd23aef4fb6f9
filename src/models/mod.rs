// src/models/mod.rs

pub mod category;
pub mod like;
pub mod profile;
pub mod report;
pub mod update;
pub mod user;
