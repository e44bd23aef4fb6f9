// src/conversation/step.rs

//! Conversation states and the per-kind transition table.

use crate::models::profile::ProfileKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    AskName,
    AskGender,
    AskAge,
    AskCountry,
    AskCustomCountry,
    AskBio,
    AskLocation,
    AskPhotos,
    AskCategory,
    AskSubcategory,
    AskSkills,
    AskRate,
    AskExperience,
    AskProjectDetails,
    AskBudget,
    AskTimeline,
    EditChoice,
    ConfirmSave,
}

use Step::*;

const DATING_FLOW: &[Step] = &[
    AskName,
    AskGender,
    AskAge,
    AskCountry,
    AskBio,
    AskLocation,
    AskPhotos,
    ConfirmSave,
];

const FREELANCER_FLOW: &[Step] = &[
    AskName,
    AskAge,
    AskCountry,
    AskCategory,
    AskSkills,
    AskRate,
    AskExperience,
    AskPhotos,
    ConfirmSave,
];

const CLIENT_FLOW: &[Step] = &[
    AskName,
    AskCountry,
    AskProjectDetails,
    AskBudget,
    AskTimeline,
    AskCategory,
    ConfirmSave,
];

/// Ordered steps a creation flow of `kind` walks through.
pub fn sequence(kind: ProfileKind) -> &'static [Step] {
    match kind {
        ProfileKind::Dating => DATING_FLOW,
        ProfileKind::Freelancer => FREELANCER_FLOW,
        ProfileKind::Client => CLIENT_FLOW,
    }
}

pub fn first(kind: ProfileKind) -> Step {
    sequence(kind)[0]
}

/// Sub-steps live at the position of the step that branches into them.
fn anchor(step: Step) -> Step {
    match step {
        AskCustomCountry => AskCountry,
        AskSubcategory => AskCategory,
        other => other,
    }
}

/// The step that follows `step` in a creation flow of `kind`.
pub fn after(kind: ProfileKind, step: Step) -> Step {
    let seq = sequence(kind);
    seq.iter()
        .position(|s| *s == anchor(step))
        .and_then(|i| seq.get(i + 1))
        .copied()
        .unwrap_or(ConfirmSave)
}

/// Steps offered in the edit menu of `kind`.
pub fn editable(kind: ProfileKind) -> impl Iterator<Item = Step> {
    sequence(kind).iter().copied().filter(|s| *s != ConfirmSave)
}

pub fn is_skippable(kind: ProfileKind, step: Step) -> bool {
    matches!(
        (kind, step),
        (ProfileKind::Dating, AskBio)
            | (ProfileKind::Freelancer, AskAge)
            | (ProfileKind::Freelancer, AskSkills)
            | (ProfileKind::Freelancer, AskRate)
            | (ProfileKind::Freelancer, AskPhotos)
            | (ProfileKind::Client, AskBudget)
            | (ProfileKind::Client, AskTimeline)
    )
}

/// Whether the profile must carry at least one photo.
pub fn photos_required(kind: ProfileKind) -> bool {
    kind == ProfileKind::Dating
}

impl Step {
    const ALL: [Step; 18] = [
        AskName,
        AskGender,
        AskAge,
        AskCountry,
        AskCustomCountry,
        AskBio,
        AskLocation,
        AskPhotos,
        AskCategory,
        AskSubcategory,
        AskSkills,
        AskRate,
        AskExperience,
        AskProjectDetails,
        AskBudget,
        AskTimeline,
        EditChoice,
        ConfirmSave,
    ];

    /// Stable token used in button payloads.
    pub fn token(self) -> &'static str {
        match self {
            AskName => "name",
            AskGender => "gender",
            AskAge => "age",
            AskCountry => "country",
            AskCustomCountry => "custom_country",
            AskBio => "bio",
            AskLocation => "location",
            AskPhotos => "photos",
            AskCategory => "category",
            AskSubcategory => "subcategory",
            AskSkills => "skills",
            AskRate => "rate",
            AskExperience => "experience",
            AskProjectDetails => "project",
            AskBudget => "budget",
            AskTimeline => "timeline",
            EditChoice => "edit",
            ConfirmSave => "confirm",
        }
    }

    pub fn from_token(token: &str) -> Option<Step> {
        Step::ALL.into_iter().find(|s| s.token() == token)
    }

    /// Label of the field this step collects, as shown in the edit menu.
    pub fn field_label(self, kind: ProfileKind) -> &'static str {
        match self {
            AskName if kind == ProfileKind::Client => "Name / Company",
            AskName => "Name",
            AskGender => "Gender",
            AskAge => "Age",
            AskCountry | AskCustomCountry => "Country",
            AskBio => "Bio",
            AskLocation => "Location",
            AskPhotos => "Photos",
            AskCategory | AskSubcategory => "Categories",
            AskSkills => "Skills & Portfolio",
            AskRate => "Rate",
            AskExperience => "Experience",
            AskProjectDetails => "Project",
            AskBudget => "Budget",
            AskTimeline => "Timeline",
            EditChoice | ConfirmSave => "",
        }
    }
}
