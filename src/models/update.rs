// src/models/update.rs

use serde::{Deserialize, Serialize};

use crate::models::user::Sender;

/// One inbound event delivered by the transport bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundUpdate {
    pub from: Sender,
    pub event: Event,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Text {
        text: String,
    },
    /// File ids of the available sizes, smallest first.
    Photo {
        file_ids: Vec<String>,
        #[serde(default)]
        caption: Option<String>,
    },
    Location {
        latitude: f64,
        longitude: f64,
    },
    Button {
        data: String,
        /// Message carrying the pressed menu, edited in place when present.
        #[serde(default)]
        message_id: Option<i64>,
        #[serde(default)]
        callback_id: Option<String>,
    },
}

/// A labelled button; `action` is the opaque token echoed back on press.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub action: String,
}

/// Rows of buttons rendered under a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub rows: Vec<Vec<Button>>,
}

impl Menu {
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.buttons().any(|b| b.action == action)
    }
}

/// Something the transport bridge must do on the service's behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundAction {
    SendText {
        chat_id: i64,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        menu: Option<Menu>,
    },
    SendPhoto {
        chat_id: i64,
        photo: String,
        caption: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        menu: Option<Menu>,
    },
    EditMessage {
        chat_id: i64,
        message_id: i64,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        menu: Option<Menu>,
    },
    AnswerCallback {
        callback_id: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        text: Option<String>,
        #[serde(default)]
        alert: bool,
    },
}

impl OutboundAction {
    pub fn chat_id(&self) -> Option<i64> {
        match self {
            OutboundAction::SendText { chat_id, .. }
            | OutboundAction::SendPhoto { chat_id, .. }
            | OutboundAction::EditMessage { chat_id, .. } => Some(*chat_id),
            OutboundAction::AnswerCallback { .. } => None,
        }
    }

    /// Message text or photo caption.
    pub fn text(&self) -> Option<&str> {
        match self {
            OutboundAction::SendText { text, .. } | OutboundAction::EditMessage { text, .. } => Some(text),
            OutboundAction::SendPhoto { caption, .. } => Some(caption),
            OutboundAction::AnswerCallback { text, .. } => text.as_deref(),
        }
    }

    pub fn menu(&self) -> Option<&Menu> {
        match self {
            OutboundAction::SendText { menu, .. }
            | OutboundAction::SendPhoto { menu, .. }
            | OutboundAction::EditMessage { menu, .. } => menu.as_ref(),
            OutboundAction::AnswerCallback { .. } => None,
        }
    }
}

/// Body returned from `POST /api/updates`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub actions: Vec<OutboundAction>,
}
