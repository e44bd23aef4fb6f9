// src/handlers/report.rs

use validator::Validate;

use crate::{
    error::AppError,
    handlers::context::BotContext,
    keyboards,
    models::report::CreateReportRequest,
    store::reports,
    utils::validation::parse_public_id,
};

const REPORT_USAGE: &str = "Usage: /report <message>\n\
    To report a profile, start with its Unique ID, e.g.\n/report D_1a2b3c4d fake photos";

/// Splits "/report" arguments into an optional leading public id and the message.
pub fn parse_report(args: &str) -> CreateReportRequest {
    let args = args.trim();
    let (first, rest) = args.split_once(char::is_whitespace).unwrap_or((args, ""));

    if let Some(id) = parse_public_id(first) {
        CreateReportRequest {
            message: rest.trim().to_string(),
            target_public_id: Some(id.to_string()),
        }
    } else {
        CreateReportRequest {
            message: args.to_string(),
            target_public_id: None,
        }
    }
}

/// `/report <message>`: stores the report and tells the admin.
pub async fn file(ctx: &BotContext<'_>, args: &str) -> Result<(), AppError> {
    let request = parse_report(args);
    if request.message.is_empty() {
        return ctx.send(REPORT_USAGE, None).await;
    }
    if let Err(e) = request.validate() {
        tracing::debug!("Rejected report from {}: {}", ctx.user_id(), e);
        return ctx
            .send("⚠️ Report message must be between 1 and 1000 characters.", None)
            .await;
    }

    let report = reports::create_report(
        &ctx.state.pool,
        ctx.user_id(),
        &request.message,
        request.target_public_id.as_deref(),
    )
    .await?;

    ctx.send("✅ Thank you. Your report has been sent to the admin.", None)
        .await?;

    if let Some(admin_id) = ctx.state.config.admin_user_id {
        let text = format!(
            "🚩 New report #{} from {} ({})\nTarget: {}\n\n{}",
            report.report_id,
            ctx.user.display_name(),
            ctx.user_id(),
            report.reported_public_id.as_deref().unwrap_or("-"),
            report.report_message
        );
        ctx.notify(admin_id, text, Some(keyboards::resolve_report(report.report_id)))
            .await?;
    } else {
        tracing::warn!("Report {} filed but no ADMIN_USER_ID is configured", report.report_id);
    }
    Ok(())
}
