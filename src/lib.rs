// src/lib.rs

pub mod action;
pub mod config;
pub mod conversation;
pub mod error;
pub mod handlers;
pub mod keyboards;
pub mod messenger;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;

// Re-export specific items for convenience if needed
pub use handlers::handle_update;
pub use routes::create_router;
