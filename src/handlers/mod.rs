// src/handlers/mod.rs

pub mod admin;
pub mod browse;
pub mod context;
pub mod conversation;
pub mod dispatch;
pub mod menu;
pub mod profile;
pub mod report;
pub mod timeout;
pub mod updates;

pub use dispatch::handle_update;
