// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    /// Chat-platform identity. Also the chat id for private conversations.
    pub telegram_id: i64,

    /// Public handle without the leading '@'.
    pub username: Option<String>,

    pub first_name: String,
    pub last_name: Option<String>,

    /// Banned users are excluded from every bot operation.
    pub is_banned: bool,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }

    /// How another user can reach this one once a request is accepted.
    pub fn contact(&self) -> String {
        match &self.username {
            Some(handle) if !handle.is_empty() => format!("@{}", handle),
            _ => format!("tg://user?id={}", self.telegram_id),
        }
    }
}

/// Sender information attached to every inbound update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sender {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Aggregated counters shown in the admin panel.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BotStats {
    pub users: i64,
    pub banned_users: i64,
    pub dating_profiles: i64,
    pub freelancer_profiles: i64,
    pub client_profiles: i64,
    pub pending_likes: i64,
    pub accepted_likes: i64,
    pub new_reports: i64,
}
