// src/handlers/menu.rs

use crate::{
    action::Action,
    conversation::{Input, Session},
    error::AppError,
    handlers::{admin, browse, context::BotContext, conversation, profile},
    keyboards,
    models::like::LikeStatus,
};

pub const WELCOME_HINT: &str = "I can help you connect with new people (❤️ Dating) or find/post freelancing \
    opportunities (💼 Freelancing).\n\nUse the buttons below to get started.";

pub fn help_text() -> String {
    "⚙️ **Settings & Help**\n\n\
     Available Commands:\n\
     `/start` - Show the main menu.\n\
     `/delete` - Delete your profile(s).\n\
     `/report <message>` - Report an issue or a user to the admin.\n\
     `/cancel` - Stop creating or editing a profile.\n\
     `/skip` - Skip an optional step.\n\
     `/donephotos` - Finish uploading photos.\n\n\
     Use the main menu buttons to navigate profiles."
        .to_string()
}

pub async fn main_menu(ctx: &BotContext<'_>) -> Result<(), AppError> {
    ctx.show("🏠 Main Menu:\nChoose an option:", keyboards::main_menu()).await
}

/// Routes a button press.
pub async fn route(ctx: &mut BotContext<'_>, session: &mut Session, action: Action) -> Result<(), AppError> {
    if action.is_flow_input() {
        if session.flow.is_none() {
            ctx.answer(Some("This step has expired. Please start again."), true).await?;
            return main_menu(ctx).await;
        }
        return conversation::feed(ctx, session, Input::Choice(action)).await;
    }

    // Any other button abandons a half-written request message.
    if !matches!(action, Action::Like(_)) {
        session.pending_like = None;
    }

    match action {
        Action::MainMenu => main_menu(ctx).await,
        Action::ProfileMenu => {
            ctx.show(
                "Select the type of profile you want to manage or create:",
                keyboards::profile_type_choice(),
            )
            .await
        }
        Action::FreelancerRoleChoice => {
            ctx.show(
                "Are you looking to offer your services or hire someone?",
                keyboards::freelancer_role_choice(),
            )
            .await
        }
        Action::SettingsHelp => ctx.show(help_text(), keyboards::back_to_main_menu()).await,

        Action::KindMenu(kind) => profile::kind_menu(ctx, kind).await,
        Action::Create(kind) => conversation::create(ctx, session, kind).await,
        Action::Edit(kind) => conversation::edit(ctx, session, kind).await,
        Action::View(kind) => profile::view(ctx, kind).await,
        Action::DeleteAsk(kind) => profile::delete_ask(ctx, kind).await,
        Action::DeleteConfirm(kind) => profile::delete_confirm(ctx, session, kind).await,

        Action::BrowseStart => browse::start(ctx, session).await,
        Action::BrowsePref(preference) => browse::set_preference(ctx, session, preference).await,
        Action::BrowseNext | Action::Dislike(_) => browse::next(ctx, session).await,
        Action::Like(public_id) => browse::like(ctx, session, &public_id).await,
        Action::Accept(like_id) => browse::respond(ctx, like_id, LikeStatus::Accepted).await,
        Action::Reject(like_id) => browse::respond(ctx, like_id, LikeStatus::Rejected).await,

        Action::AdminPanel => admin::panel(ctx).await,
        Action::AdminStats => admin::stats(ctx).await,
        Action::AdminReports => admin::list_reports(ctx).await,
        Action::ResolveReport(report_id) => admin::resolve_report(ctx, report_id).await,

        // Flow inputs were handled above.
        Action::EditField(_)
        | Action::Gender(_)
        | Action::Country(_)
        | Action::Skip
        | Action::PhotosDone
        | Action::Category(_)
        | Action::Subcategory(_, _)
        | Action::CategoriesDone
        | Action::CategoryBack
        | Action::Experience(_)
        | Action::Save
        | Action::Cancel => Ok(()),
    }
}
