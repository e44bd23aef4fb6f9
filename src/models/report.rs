// src/models/report.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;

/// A report starts `New` and is closed once by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    New,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::New => "new",
            ReportStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(ReportStatus::New),
            "resolved" => Ok(ReportStatus::Resolved),
            other => Err(AppError::InternalServerError(format!("Unknown report status '{}'", other))),
        }
    }
}

/// Represents the 'reports' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub report_id: i64,
    pub reporter_user_id: i64,
    pub reported_public_id: Option<String>,
    pub report_message: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub report_id: i64,
    pub reporter_user_id: i64,

    /// Public identifier (D_/F_/C_) of the reported profile, if given.
    pub reported_public_id: Option<String>,

    pub report_message: String,
    pub status: ReportStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<ReportRow> for Report {
    type Error = AppError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        Ok(Report {
            report_id: row.report_id,
            reporter_user_id: row.reporter_user_id,
            reported_public_id: row.reported_public_id,
            report_message: row.report_message,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}

/// DTO for filing a report through `/report`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportRequest {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Report message must be between 1 and 1000 characters."
    ))]
    pub message: String,

    pub target_public_id: Option<String>,
}
