// src/config.rs

use std::env;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Shared secret the transport bridge sends in `X-Bot-Secret`.
    pub webhook_secret: String,
    /// Chat id of the bot administrator, if any.
    pub admin_user_id: Option<i64>,
    pub max_profile_photos: usize,
    pub request_message_limit: usize,
    /// Idle time after which an unfinished profile draft is discarded.
    pub conversation_timeout_secs: u64,
    /// Where actions produced outside a request (timeout notices) are POSTed.
    pub outbound_webhook_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://connectsphere.db?mode=rwc".to_string());

        let webhook_secret = env::var("BOT_WEBHOOK_SECRET")
            .expect("BOT_WEBHOOK_SECRET must be set");

        let admin_user_id = env::var("ADMIN_USER_ID")
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok());

        let max_profile_photos = env::var("MAX_PROFILE_PHOTOS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(3);

        let request_message_limit = env::var("REQUEST_MESSAGE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(200);

        let conversation_timeout_secs = env::var("CONVERSATION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(900);

        let outbound_webhook_url = env::var("OUTBOUND_WEBHOOK_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            webhook_secret,
            admin_user_id,
            max_profile_photos,
            request_message_limit,
            conversation_timeout_secs,
            outbound_webhook_url,
            port,
            rust_log,
        }
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_user_id == Some(user_id)
    }
}
