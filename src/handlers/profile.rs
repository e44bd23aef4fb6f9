// src/handlers/profile.rs

use crate::{
    action::Action,
    conversation::Session,
    error::AppError,
    handlers::context::BotContext,
    keyboards,
    models::profile::ProfileKind,
    store::profiles,
    utils::format::format_profile,
};

/// Shows the per-kind menu, which depends on whether the profile exists.
pub async fn kind_menu(ctx: &BotContext<'_>, kind: ProfileKind) -> Result<(), AppError> {
    let exists = profiles::get_profile(&ctx.state.pool, kind, ctx.user_id()).await?.is_some();
    let text = if exists {
        format!("{} menu. What would you like to do?", kind.title())
    } else {
        format!("You don't have a {} yet. Would you like to create one?", kind.title())
    };
    ctx.show(text, keyboards::kind_menu(kind, exists)).await
}

/// Shows the user's own profile card, with the first photo when there is one.
pub async fn view(ctx: &mut BotContext<'_>, kind: ProfileKind) -> Result<(), AppError> {
    let Some(profile) = profiles::get_profile(&ctx.state.pool, kind, ctx.user_id()).await? else {
        ctx.answer(Some("Profile not found."), true).await?;
        return ctx
            .show(
                format!("You don't seem to have a {} yet.", kind.title()),
                keyboards::kind_menu(kind, false),
            )
            .await;
    };

    let text = format!(
        "✨ **Your {}** ✨\n\n{}",
        kind.title(),
        format_profile(&profile.details, Some(&profile.public_id))
    );
    let menu = keyboards::kind_menu(kind, true);

    match profile.details.photos().first() {
        Some(photo) => ctx.send_photo(photo.clone(), text, Some(menu)).await,
        None => ctx.show(text, menu).await,
    }
}

/// Entry point of `/delete`: lists the profiles the user owns.
pub async fn delete_choice(ctx: &BotContext<'_>) -> Result<(), AppError> {
    let kinds = profiles::existing_kinds(&ctx.state.pool, ctx.user_id()).await?;
    if kinds.is_empty() {
        return ctx
            .send("You don't have any profiles to delete.", Some(keyboards::back_to_main_menu()))
            .await;
    }
    ctx.send("Which profile would you like to delete?", Some(keyboards::delete_choice(&kinds)))
        .await
}

pub async fn delete_ask(ctx: &BotContext<'_>, kind: ProfileKind) -> Result<(), AppError> {
    ctx.show(
        format!(
            "⚠️ **Are you absolutely sure?**\nDeleting your {} is permanent and cannot be undone.",
            kind.title()
        ),
        keyboards::confirmation(Action::DeleteConfirm(kind), Action::KindMenu(kind)),
    )
    .await
}

pub async fn delete_confirm(ctx: &BotContext<'_>, session: &mut Session, kind: ProfileKind) -> Result<(), AppError> {
    let deleted = profiles::delete_profile(&ctx.state.pool, ctx.user_id(), kind).await?;

    if kind == ProfileKind::Dating {
        session.browse = None;
        session.pending_like = None;
    }

    let text = if deleted {
        format!("🗑️ Your {} has been deleted.", kind.title())
    } else {
        format!("You don't have a {}.", kind.title())
    };
    ctx.show(text, keyboards::kind_menu(kind, false)).await
}
