// src/models/profile.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

pub const COUNTRY_INDIA: &str = "India";
pub const COUNTRY_OTHER: &str = "Other";

/// The three profile domains a user can own one record of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Dating,
    Freelancer,
    Client,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 3] = [ProfileKind::Dating, ProfileKind::Freelancer, ProfileKind::Client];

    /// Single-letter tag that prefixes public identifiers.
    pub fn tag(self) -> char {
        match self {
            ProfileKind::Dating => 'D',
            ProfileKind::Freelancer => 'F',
            ProfileKind::Client => 'C',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'D' => Some(ProfileKind::Dating),
            'F' => Some(ProfileKind::Freelancer),
            'C' => Some(ProfileKind::Client),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileKind::Dating => "dating",
            ProfileKind::Freelancer => "freelancer",
            ProfileKind::Client => "client",
        }
    }

    /// Human title used in bot messages, e.g. "Dating Profile".
    pub fn title(self) -> &'static str {
        match self {
            ProfileKind::Dating => "Dating Profile",
            ProfileKind::Freelancer => "Freelancer Profile",
            ProfileKind::Client => "Client Profile",
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dating" => Ok(ProfileKind::Dating),
            "freelancer" => Ok(ProfileKind::Freelancer),
            "client" => Ok(ProfileKind::Client),
            other => Err(AppError::BadRequest(format!("Unknown profile kind '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(AppError::BadRequest(format!("Unknown gender '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Experience {
    Entry,
    Intermediate,
    Expert,
}

impl Experience {
    pub const ALL: [Experience; 3] = [Experience::Entry, Experience::Intermediate, Experience::Expert];

    pub fn as_str(self) -> &'static str {
        match self {
            Experience::Entry => "Entry",
            Experience::Intermediate => "Intermediate",
            Experience::Expert => "Expert",
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Experience {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entry" => Ok(Experience::Entry),
            "intermediate" => Ok(Experience::Intermediate),
            "expert" => Ok(Experience::Expert),
            other => Err(AppError::BadRequest(format!("Unknown experience level '{}'", other))),
        }
    }
}

/// Where a dating profile owner is: shared coordinates or a typed city name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Location {
    Coordinates { latitude: f64, longitude: f64 },
    City(String),
}

/// Field data of a dating profile, as collected by the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatingDetails {
    pub name: String,
    pub gender: Gender,
    pub age: u8,
    pub country: String,
    pub custom_country: Option<String>,
    pub bio: Option<String>,
    pub location: Option<Location>,
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreelancerDetails {
    pub name: String,
    pub age: Option<u8>,
    pub country: String,
    pub custom_country: Option<String>,
    /// "Category / Subcategory" picks from the freelance catalogue.
    pub categories: Vec<String>,
    pub skills_portfolio: Option<String>,
    pub rate: Option<String>,
    pub experience: Experience,
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDetails {
    pub name_company: String,
    pub country: String,
    pub custom_country: Option<String>,
    pub project_details: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub required_categories: Vec<String>,
}

/// A stored profile of any kind: common metadata plus kind-specific details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile<D> {
    pub profile_id: i64,
    pub user_id: i64,
    pub public_id: String,
    pub details: D,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

pub type DatingProfile = Profile<DatingDetails>;
pub type FreelancerProfile = Profile<FreelancerDetails>;
pub type ClientProfile = Profile<ClientDetails>;

/// Field data for any profile kind, used where the kind is only known at runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ProfileDetails {
    Dating(DatingDetails),
    Freelancer(FreelancerDetails),
    Client(ClientDetails),
}

impl ProfileDetails {
    pub fn kind(&self) -> ProfileKind {
        match self {
            ProfileDetails::Dating(_) => ProfileKind::Dating,
            ProfileDetails::Freelancer(_) => ProfileKind::Freelancer,
            ProfileDetails::Client(_) => ProfileKind::Client,
        }
    }

    pub fn photos(&self) -> &[String] {
        match self {
            ProfileDetails::Dating(d) => &d.photos,
            ProfileDetails::Freelancer(d) => &d.photos,
            ProfileDetails::Client(_) => &[],
        }
    }
}

/// A stored profile whose kind is only known at runtime.
pub type AnyProfile = Profile<ProfileDetails>;

impl From<DatingProfile> for AnyProfile {
    fn from(p: DatingProfile) -> Self {
        p.map(ProfileDetails::Dating)
    }
}

impl From<FreelancerProfile> for AnyProfile {
    fn from(p: FreelancerProfile) -> Self {
        p.map(ProfileDetails::Freelancer)
    }
}

impl From<ClientProfile> for AnyProfile {
    fn from(p: ClientProfile) -> Self {
        p.map(ProfileDetails::Client)
    }
}

impl<D> Profile<D> {
    fn map<E>(self, f: impl FnOnce(D) -> E) -> Profile<E> {
        Profile {
            profile_id: self.profile_id,
            user_id: self.user_id,
            public_id: self.public_id,
            details: f(self.details),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// --- Database rows ---

/// Represents the 'dating_profiles' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct DatingProfileRow {
    pub profile_id: i64,
    pub user_id: i64,
    pub public_id: String,
    pub name: String,
    pub gender: String,
    pub age: i64,
    pub country: String,
    pub custom_country: Option<String>,
    pub bio: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: Option<String>,
    /// JSON array of photo file ids.
    pub photo_file_ids: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Represents the 'freelancer_profiles' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct FreelancerProfileRow {
    pub profile_id: i64,
    pub user_id: i64,
    pub public_id: String,
    pub name: String,
    pub age: Option<i64>,
    pub country: String,
    pub custom_country: Option<String>,
    pub categories: String,
    pub skills_portfolio: Option<String>,
    pub rate: Option<String>,
    pub experience: String,
    pub photo_file_ids: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Represents the 'client_profiles' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct ClientProfileRow {
    pub profile_id: i64,
    pub user_id: i64,
    pub public_id: String,
    pub name_company: String,
    pub country: String,
    pub custom_country: Option<String>,
    pub project_details: String,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub required_categories: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn decode_list(column: &str, raw: &str) -> Result<Vec<String>, AppError> {
    serde_json::from_str(raw).map_err(|e| {
        AppError::InternalServerError(format!("Corrupt '{}' column: {}", column, e))
    })
}

fn decode_age(raw: i64) -> Result<u8, AppError> {
    u8::try_from(raw).map_err(|_| AppError::InternalServerError(format!("Stored age {} out of range", raw)))
}

pub(crate) fn encode_list(list: &[String]) -> Result<String, AppError> {
    serde_json::to_string(list).map_err(|e| AppError::InternalServerError(e.to_string()))
}

impl TryFrom<DatingProfileRow> for DatingProfile {
    type Error = AppError;

    fn try_from(row: DatingProfileRow) -> Result<Self, Self::Error> {
        let location = match (row.latitude, row.longitude, row.city) {
            (Some(latitude), Some(longitude), _) => Some(Location::Coordinates { latitude, longitude }),
            (_, _, Some(city)) => Some(Location::City(city)),
            _ => None,
        };

        Ok(Profile {
            profile_id: row.profile_id,
            user_id: row.user_id,
            public_id: row.public_id,
            details: DatingDetails {
                name: row.name,
                gender: row.gender.parse()?,
                age: decode_age(row.age)?,
                country: row.country,
                custom_country: row.custom_country,
                bio: row.bio,
                location,
                photos: decode_list("photo_file_ids", &row.photo_file_ids)?,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<FreelancerProfileRow> for FreelancerProfile {
    type Error = AppError;

    fn try_from(row: FreelancerProfileRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            profile_id: row.profile_id,
            user_id: row.user_id,
            public_id: row.public_id,
            details: FreelancerDetails {
                name: row.name,
                age: row.age.map(decode_age).transpose()?,
                country: row.country,
                custom_country: row.custom_country,
                categories: decode_list("categories", &row.categories)?,
                skills_portfolio: row.skills_portfolio,
                rate: row.rate,
                experience: row.experience.parse()?,
                photos: decode_list("photo_file_ids", &row.photo_file_ids)?,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<ClientProfileRow> for ClientProfile {
    type Error = AppError;

    fn try_from(row: ClientProfileRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            profile_id: row.profile_id,
            user_id: row.user_id,
            public_id: row.public_id,
            details: ClientDetails {
                name_company: row.name_company,
                country: row.country,
                custom_country: row.custom_country,
                project_details: row.project_details,
                budget: row.budget,
                timeline: row.timeline,
                required_categories: decode_list("required_categories", &row.required_categories)?,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
