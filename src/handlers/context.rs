// src/handlers/context.rs

use crate::{
    error::AppError,
    messenger::Messenger,
    models::{
        update::{Menu, OutboundAction},
        user::User,
    },
    state::AppState,
};

/// Everything a bot handler needs while serving one inbound update.
pub struct BotContext<'a> {
    pub state: &'a AppState,
    pub out: &'a dyn Messenger,
    pub user: User,
    /// Message holding the pressed menu, if the update was a button press.
    pub message_id: Option<i64>,
    callback_id: Option<String>,
}

impl<'a> BotContext<'a> {
    pub fn new(
        state: &'a AppState,
        out: &'a dyn Messenger,
        user: User,
        message_id: Option<i64>,
        callback_id: Option<String>,
    ) -> Self {
        Self {
            state,
            out,
            user,
            message_id,
            callback_id,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user.telegram_id
    }

    pub fn is_admin(&self) -> bool {
        self.state.config.is_admin(self.user_id())
    }

    /// Sends a new message to the current user.
    pub async fn send(&self, text: impl Into<String>, menu: Option<Menu>) -> Result<(), AppError> {
        self.notify(self.user_id(), text, menu).await
    }

    /// Replaces the pressed menu message in place, or sends a new message.
    pub async fn show(&self, text: impl Into<String>, menu: Menu) -> Result<(), AppError> {
        match self.message_id {
            Some(message_id) => {
                self.out
                    .deliver(OutboundAction::EditMessage {
                        chat_id: self.user_id(),
                        message_id,
                        text: text.into(),
                        menu: Some(menu),
                    })
                    .await
            }
            None => self.send(text, Some(menu)).await,
        }
    }

    pub async fn send_photo(
        &self,
        photo: impl Into<String>,
        caption: impl Into<String>,
        menu: Option<Menu>,
    ) -> Result<(), AppError> {
        self.notify_photo(self.user_id(), photo, caption, menu).await
    }

    /// Sends a message to another user.
    pub async fn notify(&self, chat_id: i64, text: impl Into<String>, menu: Option<Menu>) -> Result<(), AppError> {
        self.out
            .deliver(OutboundAction::SendText {
                chat_id,
                text: text.into(),
                menu,
            })
            .await
    }

    pub async fn notify_photo(
        &self,
        chat_id: i64,
        photo: impl Into<String>,
        caption: impl Into<String>,
        menu: Option<Menu>,
    ) -> Result<(), AppError> {
        self.out
            .deliver(OutboundAction::SendPhoto {
                chat_id,
                photo: photo.into(),
                caption: caption.into(),
                menu,
            })
            .await
    }

    /// Acknowledges the button press. Only the first answer is delivered.
    pub async fn answer(&mut self, text: Option<&str>, alert: bool) -> Result<(), AppError> {
        let Some(callback_id) = self.callback_id.take() else {
            return Ok(());
        };
        self.out
            .deliver(OutboundAction::AnswerCallback {
                callback_id,
                text: text.map(str::to_string),
                alert,
            })
            .await
    }
}
