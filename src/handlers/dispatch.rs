// src/handlers/dispatch.rs

//! Entry point for every inbound update: user check, session lock, timeout
//! check, then routing by event type.

use std::time::{Duration, Instant};

use crate::{
    action::Action,
    conversation::{Input, Session},
    error::AppError,
    handlers::{admin, browse, context::BotContext, conversation, menu, profile, report, timeout},
    keyboards,
    messenger::Messenger,
    models::update::{Event, InboundUpdate, OutboundAction},
    state::AppState,
    store::users,
};

pub const FAILURE_NOTICE: &str =
    "❌ An error occurred while processing your request. Please try again later or contact support.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Cancel,
    Delete,
    Report(String),
    Skip,
    DonePhotos,
    Admin,
    Ban(String),
    Unban(String),
    Broadcast(String),
    Unknown(String),
}

impl Command {
    /// Parses "/name args". Returns `None` for plain text.
    /// A "@botname" suffix on the command is ignored.
    pub fn parse(text: &str) -> Option<Command> {
        let text = text.trim();
        let rest = text.strip_prefix('/')?;
        let (head, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let name = head.split('@').next().unwrap_or(head).to_lowercase();
        let args = args.trim().to_string();

        Some(match name.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "cancel" => Command::Cancel,
            "delete" => Command::Delete,
            "report" => Command::Report(args),
            "skip" => Command::Skip,
            "donephotos" => Command::DonePhotos,
            "admin" => Command::Admin,
            "ban" => Command::Ban(args),
            "unban" => Command::Unban(args),
            "broadcast" => Command::Broadcast(args),
            _ => Command::Unknown(name),
        })
    }
}

/// Handles one inbound update, sending every resulting action through `out`.
///
/// Banned senders get no actions at all. Store failures end the active flow and
/// produce a generic notice instead of an error, including when the sender cannot
/// be loaded.
pub async fn handle_update(state: &AppState, out: &dyn Messenger, update: InboundUpdate) -> Result<(), AppError> {
    let InboundUpdate { from, event } = update;

    let user = match users::get_or_create_user(&state.pool, &from).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!("Ignoring update from banned user {}", from.id);
            state.sessions.discard(from.id).await;
            return Ok(());
        }
        Err(err) => {
            tracing::error!("Failed to load user {}: {}", from.id, err);
            state.sessions.discard(from.id).await;
            return out
                .deliver(OutboundAction::SendText {
                    chat_id: from.id,
                    text: FAILURE_NOTICE.to_string(),
                    menu: Some(keyboards::back_to_main_menu()),
                })
                .await;
        }
    };

    let (message_id, callback_id) = match &event {
        Event::Button {
            message_id,
            callback_id,
            ..
        } => (*message_id, callback_id.clone()),
        _ => (None, None),
    };
    let mut ctx = BotContext::new(state, out, user, message_id, callback_id);

    let session = state.sessions.session(ctx.user_id()).await;
    let mut session = session.lock().await;

    let now = Instant::now();
    let idle_limit = Duration::from_secs(state.config.conversation_timeout_secs);
    if session.expire_if_idle(now, idle_limit) {
        tracing::info!("Conversation timed out for user {}", ctx.user_id());
        ctx.send(timeout::TIMEOUT_NOTICE, None).await?;
    }
    session.touch(now);

    if let Err(err) = route(&mut ctx, &mut session, event).await {
        match err {
            AppError::InternalServerError(msg) => {
                tracing::error!("Failed to handle update from {}: {}", ctx.user_id(), msg);
                session.flow = None;
                session.pending_like = None;
                ctx.send(FAILURE_NOTICE, Some(keyboards::back_to_main_menu())).await?;
            }
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::AuthError(msg) => {
                tracing::debug!("Update from {} rejected: {}", ctx.user_id(), msg);
                ctx.send(format!("⚠️ {}", msg), None).await?;
            }
        }
    }

    ctx.answer(None, false).await
}

async fn route(ctx: &mut BotContext<'_>, session: &mut Session, event: Event) -> Result<(), AppError> {
    match event {
        Event::Text { text } => match Command::parse(&text) {
            Some(command) => run_command(ctx, session, command).await,
            None if session.pending_like.is_some() => browse::finish_like(ctx, session, Some(text)).await,
            None if session.flow.is_some() => conversation::feed(ctx, session, Input::Text(text)).await,
            None => {
                ctx.send(
                    "I didn't understand that. Use /start to open the main menu or /help for commands.",
                    None,
                )
                .await
            }
        },
        Event::Photo { file_ids, .. } => {
            let Some(largest) = file_ids.last().cloned() else {
                return ctx.send("That photo could not be read. Please try again.", None).await;
            };
            if session.flow.is_some() {
                conversation::feed(ctx, session, Input::Photo(largest)).await
            } else {
                ctx.send("I can only use photos while you create or edit a profile.", None)
                    .await
            }
        }
        Event::Location { latitude, longitude } => {
            if session.flow.is_some() {
                conversation::feed(ctx, session, Input::Location { latitude, longitude }).await
            } else {
                ctx.send("I can only use your location while you create or edit a profile.", None)
                    .await
            }
        }
        Event::Button { data, .. } => match data.parse::<Action>() {
            Ok(action) => menu::route(ctx, session, action).await,
            Err(_) => {
                tracing::warn!("Unknown button token '{}' from {}", data, ctx.user_id());
                ctx.answer(Some("This button is no longer valid."), true).await
            }
        },
    }
}

async fn run_command(ctx: &mut BotContext<'_>, session: &mut Session, command: Command) -> Result<(), AppError> {
    match command {
        Command::Start => {
            session.reset();
            tracing::info!("User {} started the bot", ctx.user_id());
            ctx.send(
                format!(
                    "Welcome to ConnectSphere Bot, {}! 👋\n\n{}",
                    ctx.user.first_name,
                    menu::WELCOME_HINT
                ),
                Some(keyboards::main_menu()),
            )
            .await
        }
        Command::Help => ctx.send(menu::help_text(), Some(keyboards::back_to_main_menu())).await,
        Command::Cancel => {
            if session.flow.is_some() {
                conversation::feed(ctx, session, Input::Choice(Action::Cancel)).await
            } else if session.pending_like.take().is_some() {
                ctx.send("Request cancelled.", None).await
            } else {
                ctx.send("There is nothing to cancel.", None).await
            }
        }
        Command::Delete => profile::delete_choice(ctx).await,
        Command::Report(args) => report::file(ctx, &args).await,
        Command::Skip => {
            if session.pending_like.is_some() {
                browse::finish_like(ctx, session, None).await
            } else if session.flow.is_some() {
                conversation::feed(ctx, session, Input::Skip).await
            } else {
                ctx.send("There is nothing to skip right now.", None).await
            }
        }
        Command::DonePhotos => {
            if session.flow.is_some() {
                conversation::feed(ctx, session, Input::Done).await
            } else {
                ctx.send("There is no photo upload in progress.", None).await
            }
        }
        Command::Admin => admin::panel(ctx).await,
        Command::Ban(args) => admin::set_ban(ctx, &args, true).await,
        Command::Unban(args) => admin::set_ban(ctx, &args, false).await,
        Command::Broadcast(args) => admin::broadcast(ctx, &args).await,
        Command::Unknown(name) => {
            ctx.send(format!("Unknown command /{}. Use /help to see what I can do.", name), None)
                .await
        }
    }
}
