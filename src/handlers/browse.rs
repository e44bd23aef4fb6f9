// src/handlers/browse.rs

//! Dating browse and the like -> accept/reject workflow.

use crate::{
    conversation::{BrowseState, Session},
    error::AppError,
    handlers::context::BotContext,
    keyboards,
    models::{
        like::LikeStatus,
        profile::{DatingProfile, Gender, ProfileDetails, ProfileKind},
    },
    store::{likes, profiles, users},
    utils::{format::format_profile, validation::is_valid_text},
};

fn card(profile: &DatingProfile) -> String {
    format_profile(
        &ProfileDetails::Dating(profile.details.clone()),
        Some(&profile.public_id),
    )
}

/// Browsing needs the viewer's own dating profile.
async fn require_own_profile(ctx: &BotContext<'_>) -> Result<Option<DatingProfile>, AppError> {
    let own = profiles::get_dating_profile(&ctx.state.pool, ctx.user_id()).await?;
    if own.is_none() {
        ctx.show(
            "You need a Dating Profile before you can browse or send requests.",
            keyboards::kind_menu(ProfileKind::Dating, false),
        )
        .await?;
    }
    Ok(own)
}

pub async fn start(ctx: &BotContext<'_>, session: &mut Session) -> Result<(), AppError> {
    if require_own_profile(ctx).await?.is_none() {
        return Ok(());
    }
    session.browse = None;
    ctx.show("Who would you like to see?", keyboards::browse_preference()).await
}

pub async fn set_preference(
    ctx: &BotContext<'_>,
    session: &mut Session,
    preference: Option<Gender>,
) -> Result<(), AppError> {
    if require_own_profile(ctx).await?.is_none() {
        return Ok(());
    }
    session.browse = Some(BrowseState {
        preference,
        cursor: 0,
    });
    show_next(ctx, session).await
}

/// Next and Dislike both just move past the current candidate.
pub async fn next(ctx: &BotContext<'_>, session: &mut Session) -> Result<(), AppError> {
    if session.browse.is_none() {
        return start(ctx, session).await;
    }
    show_next(ctx, session).await
}

/// Shows the candidate after the cursor, wrapping around once the list is exhausted.
async fn show_next(ctx: &BotContext<'_>, session: &mut Session) -> Result<(), AppError> {
    let Some(state) = session.browse.as_mut() else {
        return Ok(());
    };

    let pool = &ctx.state.pool;
    let viewer = ctx.user_id();

    let mut candidate = profiles::next_dating_candidate(pool, viewer, state.preference, state.cursor).await?;
    if candidate.is_none() && state.cursor > 0 {
        state.cursor = 0;
        candidate = profiles::next_dating_candidate(pool, viewer, state.preference, 0).await?;
        if candidate.is_some() {
            ctx.send("You've seen everyone for now! Starting over from the beginning.", None)
                .await?;
        }
    }

    let Some(profile) = candidate else {
        return ctx
            .show(
                "No profiles match your preference right now. Check back later!",
                keyboards::browse_preference(),
            )
            .await;
    };

    state.cursor = profile.profile_id;
    let menu = keyboards::browse_actions(&profile.public_id);
    match profile.details.photos.first() {
        Some(photo) => ctx.send_photo(photo.clone(), card(&profile), Some(menu)).await,
        None => ctx.send(card(&profile), Some(menu)).await,
    }
}

/// Looks up a dating profile someone else may like.
async fn likeable_target(ctx: &BotContext<'_>, public_id: &str) -> Result<Option<DatingProfile>, AppError> {
    let Some(target) = profiles::get_profile_by_public_id(&ctx.state.pool, public_id).await? else {
        return Ok(None);
    };
    if target.user_id == ctx.user_id() {
        return Ok(None);
    }
    let ProfileDetails::Dating(details) = target.details else {
        return Ok(None);
    };
    match users::get_user(&ctx.state.pool, target.user_id).await? {
        Some(owner) if !owner.is_banned => Ok(Some(DatingProfile {
            profile_id: target.profile_id,
            user_id: target.user_id,
            public_id: target.public_id,
            details,
            created_at: target.created_at,
            updated_at: target.updated_at,
        })),
        _ => Ok(None),
    }
}

/// Like button: asks for an optional request message.
pub async fn like(ctx: &BotContext<'_>, session: &mut Session, public_id: &str) -> Result<(), AppError> {
    if require_own_profile(ctx).await?.is_none() {
        return Ok(());
    }
    if likeable_target(ctx, public_id).await?.is_none() {
        return ctx.send("This profile is no longer available.", None).await;
    }

    session.pending_like = Some(public_id.to_string());
    ctx.send(
        format!(
            "💌 Want to add a short message to your request? Type it now (max {} characters), \
             or type /skip to send it without one.",
            ctx.state.config.request_message_limit
        ),
        None,
    )
    .await
}

/// Sends the pending like, with `message` as its request text.
pub async fn finish_like(ctx: &BotContext<'_>, session: &mut Session, message: Option<String>) -> Result<(), AppError> {
    let Some(public_id) = session.pending_like.take() else {
        return Ok(());
    };

    let limit = ctx.state.config.request_message_limit;
    let message = message.map(|m| m.trim().to_string());
    if let Some(text) = &message {
        if !is_valid_text(text, limit) {
            session.pending_like = Some(public_id);
            return ctx
                .send(
                    format!(
                        "⚠️ Your message must be 1 to {} characters. Please shorten it or type /skip.",
                        limit
                    ),
                    None,
                )
                .await;
        }
    }

    let Some(own) = profiles::get_dating_profile(&ctx.state.pool, ctx.user_id()).await? else {
        return ctx.send("You need a Dating Profile before you can send requests.", None).await;
    };
    let Some(target) = likeable_target(ctx, &public_id).await? else {
        return ctx.send("This profile is no longer available.", None).await;
    };

    let like = match likes::create_like(&ctx.state.pool, ctx.user_id(), target.user_id, message.as_deref()).await {
        Ok(like) => like,
        Err(AppError::Conflict(msg)) => return ctx.send(format!("⚠️ {}.", msg), None).await,
        Err(e) => return Err(e),
    };

    ctx.send("✅ Request sent! We'll let you know if they accept.", None).await?;

    let mut caption = format!("💖 Someone liked your profile!\n\n{}", card(&own));
    if let Some(text) = &like.request_message {
        caption.push_str(&format!("\n\n💬 Message: {}", text));
    }
    let menu = Some(keyboards::like_response(like.like_id));
    match own.details.photos.first() {
        Some(photo) => ctx.notify_photo(target.user_id, photo.clone(), caption, menu).await?,
        None => ctx.notify(target.user_id, caption, menu).await?,
    }

    if session.browse.is_some() {
        show_next(ctx, session).await?;
    }
    Ok(())
}

/// Accept or reject a received like. Only the liked user may answer, once.
///
/// A request from a user who has since been banned is closed as rejected, and nobody
/// is told anything about the banned user.
pub async fn respond(ctx: &mut BotContext<'_>, like_id: i64, status: LikeStatus) -> Result<(), AppError> {
    let state = ctx.state;
    let pool = &state.pool;
    let liker = match likes::get_like(pool, like_id).await? {
        Some(like) => users::get_user(pool, like.liker_user_id)
            .await?
            .filter(|user| !user.is_banned),
        None => None,
    };
    let status = if liker.is_some() { status } else { LikeStatus::Rejected };

    match likes::resolve_like(pool, like_id, ctx.user_id(), status).await {
        Ok(_) => {}
        Err(AppError::NotFound(msg) | AppError::Conflict(msg)) => {
            return ctx.answer(Some(msg.as_str()), true).await;
        }
        Err(e) => return Err(e),
    }

    let Some(liker) = liker else {
        tracing::info!("Closed request {} from an unavailable user", like_id);
        ctx.answer(Some("This request is no longer available."), true).await?;
        return ctx.send("This request is no longer available.", None).await;
    };

    if status == LikeStatus::Rejected {
        ctx.answer(Some("Request rejected."), false).await?;
        return ctx.send("❌ Request rejected.", None).await;
    }

    ctx.answer(Some("Request accepted!"), false).await?;
    ctx.send(
        format!(
            "🎉 You accepted {}'s request! You can reach them at {}",
            liker.display_name(),
            liker.contact()
        ),
        None,
    )
    .await?;
    ctx.notify(
        liker.telegram_id,
        format!(
            "🎉 {} accepted your request! You can reach them at {}",
            ctx.user.display_name(),
            ctx.user.contact()
        ),
        None,
    )
    .await
}
