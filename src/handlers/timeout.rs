// src/handlers/timeout.rs

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{messenger::Messenger, models::update::OutboundAction, state::AppState};

pub const TIMEOUT_NOTICE: &str = "Profile creation timed out. Please start again if you wish.";

const SWEEP_INTERVAL: Duration = Duration::from_secs(30);

/// Discards idle drafts once and notifies their owners, best effort.
/// Returns how many drafts were discarded.
pub async fn sweep_once(state: &AppState, messenger: Option<&dyn Messenger>, now: Instant) -> usize {
    let idle_limit = Duration::from_secs(state.config.conversation_timeout_secs);
    let expired = state.sessions.sweep_expired(now, idle_limit).await;

    for user_id in &expired {
        tracing::warn!("Conversation timed out for user {}", user_id);
        let Some(messenger) = messenger else {
            continue;
        };
        let notice = OutboundAction::SendText {
            chat_id: *user_id,
            text: TIMEOUT_NOTICE.to_string(),
            menu: None,
        };
        if let Err(e) = messenger.deliver(notice).await {
            tracing::error!("Failed to send timeout message to user {}: {}", user_id, e);
        }
    }

    expired.len()
}

/// Background sweeper; runs for the lifetime of the process.
pub async fn run(state: AppState, messenger: Option<Arc<dyn Messenger>>) {
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        let discarded = sweep_once(&state, messenger.as_deref(), Instant::now()).await;
        if discarded > 0 {
            tracing::info!("Timeout sweep discarded {} draft(s)", discarded);
        }
    }
}
