// src/conversation/prompts.rs

use crate::{
    conversation::{
        flow::{Flow, FlowLimits, Mode},
        step::{self, Step, is_skippable},
    },
    keyboards,
    models::{category, profile::ProfileKind, update::Menu},
    utils::{
        format::format_profile,
        validation::{BIO_LIMIT, LONG_TEXT_LIMIT, RATE_LIMIT, SHORT_TEXT_LIMIT},
    },
};

/// The message that asks for the current step.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub text: String,
    pub menu: Option<Menu>,
    /// Sent as a photo with `text` as caption when present.
    pub photo: Option<String>,
}

impl Prompt {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
            photo: None,
        }
    }

    fn with_menu(text: impl Into<String>, menu: Menu) -> Self {
        Self {
            text: text.into(),
            menu: Some(menu),
            photo: None,
        }
    }
}

fn intro(kind: ProfileKind) -> &'static str {
    match kind {
        ProfileKind::Dating => "Okay, let's create your Dating Profile! ❤️",
        ProfileKind::Freelancer => "Okay, let's create your Freelancer Profile! 🛠️",
        ProfileKind::Client => "Okay, let's create your Client Profile! 💰",
    }
}

fn selected_categories(flow: &Flow) -> String {
    if flow.draft.categories.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = flow
        .draft
        .categories
        .iter()
        .map(|c| format!("• {}", c))
        .collect();
    format!("\n\nSelected so far:\n{}", lines.join("\n"))
}

/// Builds the prompt for `flow.step`.
pub fn prompt(flow: &Flow, limits: &FlowLimits) -> Prompt {
    let kind = flow.kind;
    let skip_menu = keyboards::skip;

    match flow.step {
        Step::AskName => {
            let what = match kind {
                ProfileKind::Client => "your name or company name",
                _ => "your name",
            };
            if flow.mode == Mode::Create && flow.step == step::first(kind) {
                Prompt::text(format!(
                    "{}\n\nFirst, please tell me {}.\n(Use your real first name or a nickname. Avoid using \
                     your full name, @username, or mobile number for privacy.)",
                    intro(kind),
                    what
                ))
            } else {
                Prompt::text(format!("Please tell me {}.", what))
            }
        }
        Step::AskGender => {
            let name = flow.draft.name.as_deref().unwrap_or("there");
            Prompt::with_menu(
                format!("Got it, {}!\nNow, please select your gender:", name),
                keyboards::gender(),
            )
        }
        Step::AskAge if is_skippable(kind, Step::AskAge) => Prompt::with_menu(
            "Please enter your age (must be between 18 and 99). You can type /skip to skip this.",
            skip_menu(),
        ),
        Step::AskAge => Prompt::text("Thanks! Now, please enter your age (must be between 18 and 99)."),
        Step::AskCountry => Prompt::with_menu("Great! Which country are you from?", keyboards::country()),
        Step::AskCustomCountry => Prompt::text("Okay, please type the name of your country:"),
        Step::AskBio => Prompt::with_menu(
            format!(
                "Perfect. Now, tell us a little about yourself! (Optional)\n\
                 Write a short bio (max {} characters). You can type /skip to skip this.",
                BIO_LIMIT
            ),
            skip_menu(),
        ),
        Step::AskLocation => Prompt::text(
            "Next, please share your location. This helps connect you with people nearby.\n\
             Share it from the attachment menu (📎 → Location) for more accuracy, or just type your city name.",
        ),
        Step::AskPhotos if kind == ProfileKind::Dating => Prompt::with_menu(
            format!(
                "Almost done! Please upload 1 to {} photos for your profile.\n\
                 Send them one by one. When you're finished, type /donephotos or just send the last one.",
                limits.max_photos
            ),
            keyboards::photos(false),
        ),
        Step::AskPhotos => Prompt::with_menu(
            format!(
                "Optionally upload up to {} portfolio photos.\n\
                 Send them one by one, then type /donephotos. You can type /skip to skip this.",
                limits.max_photos
            ),
            keyboards::photos(true),
        ),
        Step::AskCategory => {
            let question = match kind {
                ProfileKind::Client => "Which categories does your project need?",
                _ => "Which categories do you work in?",
            };
            Prompt::with_menu(
                format!(
                    "{}\nPick a category, then a subcategory. Press ✅ Done when finished.{}",
                    question,
                    selected_categories(flow)
                ),
                keyboards::categories(),
            )
        }
        Step::AskSubcategory => {
            let index = flow.draft.pending_category.unwrap_or_default();
            let name = category::category_name(index).unwrap_or("Category");
            Prompt::with_menu(
                format!("{}: pick a subcategory.", name),
                keyboards::subcategories(index),
            )
        }
        Step::AskSkills => Prompt::with_menu(
            format!(
                "Describe your skills and link your portfolio (max {} characters).\nYou can type /skip to skip this.",
                LONG_TEXT_LIMIT
            ),
            skip_menu(),
        ),
        Step::AskRate => Prompt::with_menu(
            format!(
                "What is your rate? (e.g. $20/hour or $500/project, max {} characters)\nYou can type /skip to skip this.",
                RATE_LIMIT
            ),
            skip_menu(),
        ),
        Step::AskExperience => Prompt::with_menu("Select your experience level:", keyboards::experience()),
        Step::AskProjectDetails => Prompt::text(format!(
            "Describe your project: what do you need done? (max {} characters)",
            LONG_TEXT_LIMIT
        )),
        Step::AskBudget => Prompt::with_menu(
            format!(
                "What is your budget? (max {} characters)\nYou can type /skip to skip this.",
                SHORT_TEXT_LIMIT
            ),
            skip_menu(),
        ),
        Step::AskTimeline => Prompt::with_menu(
            format!(
                "What is your timeline? (max {} characters)\nYou can type /skip to skip this.",
                SHORT_TEXT_LIMIT
            ),
            skip_menu(),
        ),
        Step::EditChoice => Prompt::with_menu(
            "Which field would you like to edit?",
            keyboards::edit_fields(kind),
        ),
        Step::ConfirmSave => confirm_prompt(flow),
    }
}

fn confirm_prompt(flow: &Flow) -> Prompt {
    match flow.draft.to_details(flow.kind) {
        Ok(details) => Prompt {
            text: format!(
                "Looks great! Here's your profile preview:\n\n{}\nDo you want to save this profile?",
                format_profile(&details, None)
            ),
            menu: Some(keyboards::save_or_cancel()),
            photo: details.photos().first().cloned(),
        },
        Err(_) => Prompt::with_menu(
            "Some details are still missing. Do you want to try saving anyway?",
            keyboards::save_or_cancel(),
        ),
    }
}
