// src/action.rs

//! Typed button payloads. Every menu button carries one of these as its
//! string token, and every button press is parsed back into one.

use std::fmt;
use std::str::FromStr;

use crate::{
    conversation::step::Step,
    error::AppError,
    models::profile::{Experience, Gender, ProfileKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryChoice {
    India,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MainMenu,
    ProfileMenu,
    SettingsHelp,
    FreelancerRoleChoice,
    KindMenu(ProfileKind),
    Create(ProfileKind),
    View(ProfileKind),
    Edit(ProfileKind),
    DeleteAsk(ProfileKind),
    DeleteConfirm(ProfileKind),

    // Conversation input
    EditField(Step),
    Gender(Gender),
    Country(CountryChoice),
    Skip,
    PhotosDone,
    Category(usize),
    Subcategory(usize, usize),
    CategoriesDone,
    CategoryBack,
    Experience(Experience),
    Save,
    Cancel,

    // Matching
    BrowseStart,
    /// `None` shows every gender.
    BrowsePref(Option<Gender>),
    BrowseNext,
    Like(String),
    Dislike(String),
    Accept(i64),
    Reject(i64),

    // Moderation
    AdminPanel,
    AdminStats,
    AdminReports,
    ResolveReport(i64),
}

impl Action {
    /// Buttons that belong to a running profile conversation.
    pub fn is_flow_input(&self) -> bool {
        matches!(
            self,
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
                | Action::Cancel
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::MainMenu => write!(f, "main_menu"),
            Action::ProfileMenu => write!(f, "profile_menu"),
            Action::SettingsHelp => write!(f, "settings_help"),
            Action::FreelancerRoleChoice => write!(f, "freelancer_role_choice"),
            Action::KindMenu(kind) => write!(f, "menu:{}", kind),
            Action::Create(kind) => write!(f, "create:{}", kind),
            Action::View(kind) => write!(f, "view:{}", kind),
            Action::Edit(kind) => write!(f, "edit:{}", kind),
            Action::DeleteAsk(kind) => write!(f, "delete:{}", kind),
            Action::DeleteConfirm(kind) => write!(f, "delete_confirm:{}", kind),
            Action::EditField(step) => write!(f, "edit_field:{}", step.token()),
            Action::Gender(g) => write!(f, "gender:{}", g.as_str().to_lowercase()),
            Action::Country(CountryChoice::India) => write!(f, "country:india"),
            Action::Country(CountryChoice::Other) => write!(f, "country:other"),
            Action::Skip => write!(f, "skip"),
            Action::PhotosDone => write!(f, "photos_done"),
            Action::Category(i) => write!(f, "category:{}", i),
            Action::Subcategory(i, j) => write!(f, "subcategory:{}:{}", i, j),
            Action::CategoriesDone => write!(f, "categories_done"),
            Action::CategoryBack => write!(f, "category_back"),
            Action::Experience(e) => write!(f, "experience:{}", e.as_str().to_lowercase()),
            Action::Save => write!(f, "save"),
            Action::Cancel => write!(f, "cancel"),
            Action::BrowseStart => write!(f, "browse_start"),
            Action::BrowsePref(Some(g)) => write!(f, "browse_pref:{}", g.as_str().to_lowercase()),
            Action::BrowsePref(None) => write!(f, "browse_pref:any"),
            Action::BrowseNext => write!(f, "browse_next"),
            Action::Like(id) => write!(f, "like:{}", id),
            Action::Dislike(id) => write!(f, "dislike:{}", id),
            Action::Accept(id) => write!(f, "accept:{}", id),
            Action::Reject(id) => write!(f, "reject:{}", id),
            Action::AdminPanel => write!(f, "admin_panel"),
            Action::AdminStats => write!(f, "admin_stats"),
            Action::AdminReports => write!(f, "admin_reports"),
            Action::ResolveReport(id) => write!(f, "resolve_report:{}", id),
        }
    }
}

fn bad_token(token: &str) -> AppError {
    AppError::BadRequest(format!("Unknown action '{}'", token))
}

fn index(arg: &str, token: &str) -> Result<usize, AppError> {
    arg.parse::<usize>().map_err(|_| bad_token(token))
}

fn id(arg: &str, token: &str) -> Result<i64, AppError> {
    arg.parse::<i64>().map_err(|_| bad_token(token))
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match token.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (token, None),
        };

        let action = match (name, arg) {
            ("main_menu", None) => Action::MainMenu,
            ("profile_menu", None) => Action::ProfileMenu,
            ("settings_help", None) => Action::SettingsHelp,
            ("freelancer_role_choice", None) => Action::FreelancerRoleChoice,
            ("menu", Some(kind)) => Action::KindMenu(kind.parse()?),
            ("create", Some(kind)) => Action::Create(kind.parse()?),
            ("view", Some(kind)) => Action::View(kind.parse()?),
            ("edit", Some(kind)) => Action::Edit(kind.parse()?),
            ("delete", Some(kind)) => Action::DeleteAsk(kind.parse()?),
            ("delete_confirm", Some(kind)) => Action::DeleteConfirm(kind.parse()?),
            ("edit_field", Some(step)) => {
                Action::EditField(Step::from_token(step).ok_or_else(|| bad_token(token))?)
            }
            ("gender", Some(g)) => Action::Gender(g.parse()?),
            ("country", Some("india")) => Action::Country(CountryChoice::India),
            ("country", Some("other")) => Action::Country(CountryChoice::Other),
            ("skip", None) => Action::Skip,
            ("photos_done", None) => Action::PhotosDone,
            ("category", Some(i)) => Action::Category(index(i, token)?),
            ("subcategory", Some(pair)) => {
                let (i, j) = pair.split_once(':').ok_or_else(|| bad_token(token))?;
                Action::Subcategory(index(i, token)?, index(j, token)?)
            }
            ("categories_done", None) => Action::CategoriesDone,
            ("category_back", None) => Action::CategoryBack,
            ("experience", Some(e)) => Action::Experience(e.parse()?),
            ("save", None) => Action::Save,
            ("cancel", None) => Action::Cancel,
            ("browse_start", None) => Action::BrowseStart,
            ("browse_pref", Some("any")) => Action::BrowsePref(None),
            ("browse_pref", Some(g)) => Action::BrowsePref(Some(g.parse()?)),
            ("browse_next", None) => Action::BrowseNext,
            ("like", Some(pid)) if !pid.is_empty() => Action::Like(pid.to_string()),
            ("dislike", Some(pid)) if !pid.is_empty() => Action::Dislike(pid.to_string()),
            ("accept", Some(like_id)) => Action::Accept(id(like_id, token)?),
            ("reject", Some(like_id)) => Action::Reject(id(like_id, token)?),
            ("admin_panel", None) => Action::AdminPanel,
            ("admin_stats", None) => Action::AdminStats,
            ("admin_reports", None) => Action::AdminReports,
            ("resolve_report", Some(report_id)) => Action::ResolveReport(id(report_id, token)?),
            _ => return Err(bad_token(token)),
        };
        Ok(action)
    }
}
