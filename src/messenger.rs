// src/messenger.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    error::AppError,
    models::update::{OutboundAction, UpdateResponse},
    utils::auth::SECRET_HEADER,
};

/// Carries outbound actions to the transport bridge.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn deliver(&self, action: OutboundAction) -> Result<(), AppError>;
}

/// Collects actions for the response of the update being handled.
#[derive(Debug, Default)]
pub struct Outbox {
    actions: Mutex<Vec<OutboundAction>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_actions(self) -> Vec<OutboundAction> {
        self.actions.into_inner()
    }
}

#[async_trait]
impl Messenger for Outbox {
    async fn deliver(&self, action: OutboundAction) -> Result<(), AppError> {
        self.actions.lock().await.push(action);
        Ok(())
    }
}

/// POSTs actions to the bridge's outbound webhook, one action per request.
///
/// Used for messages produced outside an inbound update, such as timeout notices.
#[derive(Debug, Clone)]
pub struct WebhookMessenger {
    client: Client,
    url: String,
    secret: String,
}

impl WebhookMessenger {
    pub fn new(url: impl Into<String>, secret: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder().timeout(Duration::from_secs(5)).build()?;
        Ok(Self {
            client,
            url: url.into(),
            secret: secret.into(),
        })
    }
}

#[async_trait]
impl Messenger for WebhookMessenger {
    async fn deliver(&self, action: OutboundAction) -> Result<(), AppError> {
        let body = UpdateResponse {
            actions: vec![action],
        };

        self.client
            .post(&self.url)
            .header(SECRET_HEADER, &self.secret)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
