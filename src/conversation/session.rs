// src/conversation/session.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::{conversation::flow::Flow, models::profile::Gender};

/// Where a user is in the dating browse list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrowseState {
    /// `None` shows every gender.
    pub preference: Option<Gender>,
    /// Profile id of the last candidate shown; 0 before the first.
    pub cursor: i64,
}

/// Per-user conversational state. Lives in memory only.
#[derive(Debug)]
pub struct Session {
    pub flow: Option<Flow>,
    pub browse: Option<BrowseState>,
    /// Public id of a profile the user liked and is writing a request message for.
    pub pending_like: Option<String>,
    pub last_activity: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            flow: None,
            browse: None,
            pending_like: None,
            last_activity: Instant::now(),
        }
    }
}

impl Session {
    pub fn touch(&mut self, now: Instant) {
        self.last_activity = now;
    }

    pub fn is_idle(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_activity) >= timeout
    }

    /// Discards an unfinished draft that has been idle for `timeout`.
    /// Returns true when a flow was discarded.
    pub fn expire_if_idle(&mut self, now: Instant, timeout: Duration) -> bool {
        if !self.is_idle(now, timeout) {
            return false;
        }
        self.pending_like = None;
        self.flow.take().is_some()
    }

    /// Drops everything; used by `/start`.
    pub fn reset(&mut self) {
        self.flow = None;
        self.browse = None;
        self.pending_like = None;
    }
}

/// All live sessions, keyed by user id.
///
/// The map lock is held only to look a session up. Handling an update holds the
/// user's own session lock, which serializes overlapping updates for that user.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<i64, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's session, created empty on first use.
    pub async fn session(&self, user_id: i64) -> Arc<Mutex<Session>> {
        let mut sessions = self.sessions.lock().await;
        sessions.entry(user_id).or_default().clone()
    }

    pub async fn discard(&self, user_id: i64) {
        let removed = self.sessions.lock().await.remove(&user_id);
        if let Some(session) = removed {
            session.lock().await.reset();
        }
    }

    /// Expires idle drafts and forgets idle sessions.
    ///
    /// Sessions held by an update in progress, locked or not, are skipped. Returns the
    /// ids of users whose draft was discarded.
    pub async fn sweep_expired(&self, now: Instant, timeout: Duration) -> Vec<i64> {
        let mut sessions = self.sessions.lock().await;
        let mut expired = Vec::new();

        sessions.retain(|user_id, session| {
            // A handler that has looked the session up but not locked it yet still owns a clone.
            if Arc::strong_count(session) > 1 {
                return true;
            }
            let Ok(mut session) = session.try_lock() else {
                return true;
            };
            if session.expire_if_idle(now, timeout) {
                expired.push(*user_id);
            }
            !session.is_idle(now, timeout)
        });

        expired
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
