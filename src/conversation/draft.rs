// src/conversation/draft.rs

use crate::conversation::step::{Step, photos_required};
use crate::models::profile::{
    ClientDetails, DatingDetails, Experience, FreelancerDetails, Gender, Location, ProfileDetails,
    ProfileKind,
};

/// Answers collected so far by one conversation.
///
/// The draft lives inside a `Flow` and is dropped with it; nothing in here is
/// persisted until the flow commits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<u8>,
    pub country: Option<String>,
    pub custom_country: Option<String>,
    pub bio: Option<String>,
    pub location: Option<Location>,
    pub photos: Vec<String>,
    pub categories: Vec<String>,
    /// Category whose subcategories are currently on screen.
    pub pending_category: Option<usize>,
    pub skills: Option<String>,
    pub rate: Option<String>,
    pub experience: Option<Experience>,
    pub project_details: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
}

/// Why a draft cannot become a profile yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    /// A required answer is missing; the step that collects it.
    Missing(Step),
    NoPhotos,
}

impl DraftError {
    /// Step the conversation must return to.
    pub fn step(self) -> Step {
        match self {
            DraftError::Missing(step) => step,
            DraftError::NoPhotos => Step::AskPhotos,
        }
    }
}

fn required<T: Clone>(value: &Option<T>, step: Step) -> Result<T, DraftError> {
    value.clone().ok_or(DraftError::Missing(step))
}

impl ProfileDraft {
    /// Seeds a draft from a stored profile for editing.
    pub fn from_details(details: &ProfileDetails) -> Self {
        match details {
            ProfileDetails::Dating(d) => ProfileDraft {
                name: Some(d.name.clone()),
                gender: Some(d.gender),
                age: Some(d.age),
                country: Some(d.country.clone()),
                custom_country: d.custom_country.clone(),
                bio: d.bio.clone(),
                location: d.location.clone(),
                photos: d.photos.clone(),
                ..Default::default()
            },
            ProfileDetails::Freelancer(d) => ProfileDraft {
                name: Some(d.name.clone()),
                age: d.age,
                country: Some(d.country.clone()),
                custom_country: d.custom_country.clone(),
                categories: d.categories.clone(),
                skills: d.skills_portfolio.clone(),
                rate: d.rate.clone(),
                experience: Some(d.experience),
                photos: d.photos.clone(),
                ..Default::default()
            },
            ProfileDetails::Client(d) => ProfileDraft {
                name: Some(d.name_company.clone()),
                country: Some(d.country.clone()),
                custom_country: d.custom_country.clone(),
                project_details: Some(d.project_details.clone()),
                budget: d.budget.clone(),
                timeline: d.timeline.clone(),
                categories: d.required_categories.clone(),
                ..Default::default()
            },
        }
    }

    /// Builds the complete profile of `kind`, or reports the first gap.
    pub fn to_details(&self, kind: ProfileKind) -> Result<ProfileDetails, DraftError> {
        let country = required(&self.country, Step::AskCountry)?;

        match kind {
            ProfileKind::Dating => {
                if photos_required(kind) && self.photos.is_empty() {
                    return Err(DraftError::NoPhotos);
                }
                Ok(ProfileDetails::Dating(DatingDetails {
                    name: required(&self.name, Step::AskName)?,
                    gender: required(&self.gender, Step::AskGender)?,
                    age: required(&self.age, Step::AskAge)?,
                    country,
                    custom_country: self.custom_country.clone(),
                    bio: self.bio.clone(),
                    location: Some(required(&self.location, Step::AskLocation)?),
                    photos: self.photos.clone(),
                }))
            }
            ProfileKind::Freelancer => {
                if self.categories.is_empty() {
                    return Err(DraftError::Missing(Step::AskCategory));
                }
                Ok(ProfileDetails::Freelancer(FreelancerDetails {
                    name: required(&self.name, Step::AskName)?,
                    age: self.age,
                    country,
                    custom_country: self.custom_country.clone(),
                    categories: self.categories.clone(),
                    skills_portfolio: self.skills.clone(),
                    rate: self.rate.clone(),
                    experience: required(&self.experience, Step::AskExperience)?,
                    photos: self.photos.clone(),
                }))
            }
            ProfileKind::Client => {
                if self.categories.is_empty() {
                    return Err(DraftError::Missing(Step::AskCategory));
                }
                Ok(ProfileDetails::Client(ClientDetails {
                    name_company: required(&self.name, Step::AskName)?,
                    country,
                    custom_country: self.custom_country.clone(),
                    project_details: required(&self.project_details, Step::AskProjectDetails)?,
                    budget: self.budget.clone(),
                    timeline: self.timeline.clone(),
                    required_categories: self.categories.clone(),
                }))
            }
        }
    }
}
