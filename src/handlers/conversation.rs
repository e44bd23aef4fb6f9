// src/handlers/conversation.rs

use crate::{
    conversation::{
        Flow, FlowLimits, Input, Mode, Reaction, Session,
        prompts::{Prompt, prompt},
    },
    error::AppError,
    handlers::context::BotContext,
    keyboards,
    models::profile::ProfileKind,
    store::profiles,
};

fn limits(ctx: &BotContext<'_>) -> FlowLimits {
    FlowLimits {
        max_photos: ctx.state.config.max_profile_photos,
    }
}

async fn send_prompt(ctx: &BotContext<'_>, prompt: Prompt) -> Result<(), AppError> {
    match prompt.photo {
        Some(photo) => ctx.send_photo(photo, prompt.text, prompt.menu).await,
        None => ctx.send(prompt.text, prompt.menu).await,
    }
}

/// Starts `flow`, replacing any unfinished one, and asks its first question.
pub async fn begin(ctx: &BotContext<'_>, session: &mut Session, flow: Flow) -> Result<(), AppError> {
    tracing::info!(
        "User {} started {:?} flow for {} profile",
        ctx.user_id(),
        flow.mode,
        flow.kind
    );
    let first = prompt(&flow, &limits(ctx));
    session.pending_like = None;
    session.flow = Some(flow);
    send_prompt(ctx, first).await
}

/// Creates a profile of `kind` unless the user already owns one.
pub async fn create(ctx: &BotContext<'_>, session: &mut Session, kind: ProfileKind) -> Result<(), AppError> {
    if profiles::get_profile(&ctx.state.pool, kind, ctx.user_id()).await?.is_some() {
        return ctx
            .show(
                format!("You already have a {}. What would you like to do?", kind.title()),
                keyboards::kind_menu(kind, true),
            )
            .await;
    }
    begin(ctx, session, Flow::create(kind)).await
}

pub async fn edit(ctx: &BotContext<'_>, session: &mut Session, kind: ProfileKind) -> Result<(), AppError> {
    let Some(profile) = profiles::get_profile(&ctx.state.pool, kind, ctx.user_id()).await? else {
        return ctx
            .show(
                format!("You don't seem to have a {} yet.", kind.title()),
                keyboards::kind_menu(kind, false),
            )
            .await;
    };
    begin(ctx, session, Flow::edit(kind, &profile.details)).await
}

/// Feeds one input to the active flow and reacts to the outcome.
pub async fn feed(ctx: &BotContext<'_>, session: &mut Session, input: Input) -> Result<(), AppError> {
    let limits = limits(ctx);
    let Some(flow) = session.flow.as_mut() else {
        return ctx
            .send("There is no profile in progress. Use /start to open the main menu.", None)
            .await;
    };

    match flow.apply(input, &limits) {
        Reaction::Stay(message) => ctx.send(message, None).await,
        Reaction::Advanced { notice } => {
            if let Some(notice) = notice {
                ctx.send(notice, None).await?;
            }
            send_prompt(ctx, prompt(flow, &limits)).await
        }
        Reaction::Commit(details) => {
            let (kind, mode) = (flow.kind, flow.mode);
            // The flow ends here whether or not the save succeeds.
            session.flow = None;

            let saved = profiles::save_profile(&ctx.state.pool, ctx.user_id(), &details).await?;
            tracing::info!(
                "{} saved for user {}. Public ID: {}",
                kind.title(),
                ctx.user_id(),
                saved.public_id
            );

            let verb = match mode {
                Mode::Create => "created",
                Mode::Edit => "updated",
            };
            ctx.send(
                format!(
                    "✅ Your {} has been {} successfully!\nUnique ID: `{}`\n\nWhat would you like to do next?",
                    kind.title(),
                    verb,
                    saved.public_id
                ),
                Some(keyboards::kind_menu(kind, true)),
            )
            .await
        }
        Reaction::Cancelled => {
            let kind = flow.kind;
            session.flow = None;
            tracing::info!("User {} cancelled {} profile flow", ctx.user_id(), kind);
            ctx.show(
                "Profile creation cancelled. What would you like to do?",
                keyboards::profile_type_choice(),
            )
            .await
        }
    }
}
