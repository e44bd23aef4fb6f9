// src/handlers/admin.rs

//! Admin-only commands and panel. Every entry point checks `ADMIN_USER_ID`.

use crate::{
    error::AppError,
    handlers::context::BotContext,
    keyboards,
    action::Action,
    store::{profiles, reports, users},
    utils::validation::parse_public_id,
};

const REPORTS_PAGE: i64 = 10;

async fn deny(ctx: &mut BotContext<'_>) -> Result<(), AppError> {
    tracing::warn!("User {} tried an admin action", ctx.user_id());
    ctx.answer(Some("⛔ Admins only."), true).await?;
    ctx.send("⛔ This command is for admins only.", None).await
}

pub async fn panel(ctx: &mut BotContext<'_>) -> Result<(), AppError> {
    if !ctx.is_admin() {
        return deny(ctx).await;
    }
    ctx.show("🛠️ Admin Panel\nChoose an option:", keyboards::admin_panel()).await
}

pub async fn stats(ctx: &mut BotContext<'_>) -> Result<(), AppError> {
    if !ctx.is_admin() {
        return deny(ctx).await;
    }
    let stats = users::bot_stats(&ctx.state.pool).await?;
    let text = format!(
        "📊 Statistics\n\n\
         👥 Users: {} ({} banned)\n\
         ❤️ Dating profiles: {}\n\
         🛠️ Freelancer profiles: {}\n\
         💰 Client profiles: {}\n\
         💌 Requests: {} pending, {} accepted\n\
         🚩 New reports: {}",
        stats.users,
        stats.banned_users,
        stats.dating_profiles,
        stats.freelancer_profiles,
        stats.client_profiles,
        stats.pending_likes,
        stats.accepted_likes,
        stats.new_reports
    );
    ctx.show(text, keyboards::back(Action::AdminPanel)).await
}

pub async fn list_reports(ctx: &mut BotContext<'_>) -> Result<(), AppError> {
    if !ctx.is_admin() {
        return deny(ctx).await;
    }
    let reports = reports::list_new_reports(&ctx.state.pool, REPORTS_PAGE).await?;
    if reports.is_empty() {
        return ctx.show("No new reports. 🎉", keyboards::back(Action::AdminPanel)).await;
    }

    ctx.show(
        format!("🚩 {} unresolved report(s), oldest first:", reports.len()),
        keyboards::back(Action::AdminPanel),
    )
    .await?;
    for report in reports {
        let text = format!(
            "#{} from {} at {}\nTarget: {}\n\n{}",
            report.report_id,
            report.reporter_user_id,
            report.created_at.format("%Y-%m-%d %H:%M"),
            report.reported_public_id.as_deref().unwrap_or("-"),
            report.report_message
        );
        ctx.send(text, Some(keyboards::resolve_report(report.report_id))).await?;
    }
    Ok(())
}

pub async fn resolve_report(ctx: &mut BotContext<'_>, report_id: i64) -> Result<(), AppError> {
    if !ctx.is_admin() {
        return deny(ctx).await;
    }
    if reports::resolve_report(&ctx.state.pool, report_id).await? {
        tracing::info!("Report {} resolved by admin", report_id);
        ctx.answer(Some("Report resolved."), false).await?;
        ctx.send(format!("✅ Report #{} marked resolved.", report_id), None).await
    } else {
        ctx.answer(Some("Report already resolved or not found."), true).await
    }
}

/// Accepts a numeric user id or a profile's public id.
async fn resolve_target(ctx: &BotContext<'_>, arg: &str) -> Result<Option<i64>, AppError> {
    let arg = arg.trim();
    if let Ok(id) = arg.parse::<i64>() {
        return Ok(Some(id));
    }
    if let Some(public_id) = parse_public_id(arg) {
        let profile = profiles::get_profile_by_public_id(&ctx.state.pool, public_id).await?;
        return Ok(profile.map(|p| p.user_id));
    }
    Ok(None)
}

/// `/ban <id>` and `/unban <id>`.
pub async fn set_ban(ctx: &mut BotContext<'_>, arg: &str, banned: bool) -> Result<(), AppError> {
    if !ctx.is_admin() {
        return deny(ctx).await;
    }
    let command = if banned { "/ban" } else { "/unban" };
    let Some(target) = resolve_target(ctx, arg).await? else {
        return ctx
            .send(format!("Usage: {} <user id | profile ID>", command), None)
            .await;
    };
    if banned && target == ctx.user_id() {
        return ctx.send("You cannot ban yourself.", None).await;
    }

    if !users::set_banned(&ctx.state.pool, target, banned).await? {
        return ctx.send(format!("User {} not found.", target), None).await;
    }

    if banned {
        ctx.state.sessions.discard(target).await;
        ctx.send(format!("🔨 User {} has been banned.", target), None).await
    } else {
        ctx.send(format!("✅ User {} has been unbanned.", target), None).await
    }
}

/// `/broadcast <text>`: one message to every active user except the sender.
pub async fn broadcast(ctx: &mut BotContext<'_>, text: &str) -> Result<(), AppError> {
    if !ctx.is_admin() {
        return deny(ctx).await;
    }
    let text = text.trim();
    if text.is_empty() {
        return ctx.send("Usage: /broadcast <message>", None).await;
    }

    let recipients: Vec<i64> = users::active_user_ids(&ctx.state.pool)
        .await?
        .into_iter()
        .filter(|id| *id != ctx.user_id())
        .collect();

    for id in &recipients {
        ctx.notify(*id, format!("📢 {}", text), None).await?;
    }
    tracing::info!("Broadcast queued for {} users", recipients.len());
    ctx.send(format!("📢 Broadcast sent to {} users.", recipients.len()), None)
        .await
}
