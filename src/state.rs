// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::{config::Config, conversation::SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self {
            pool,
            config,
            sessions: Arc::new(SessionStore::new()),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
