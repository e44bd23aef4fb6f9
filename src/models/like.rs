// src/models/like.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Lifecycle of a like edge. Only `Pending` may change, and only once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeStatus {
    Pending,
    Accepted,
    Rejected,
}

impl LikeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LikeStatus::Pending => "pending",
            LikeStatus::Accepted => "accepted",
            LikeStatus::Rejected => "rejected",
        }
    }

    /// Whether the edge may move from `self` to `next`.
    pub fn can_become(self, next: LikeStatus) -> bool {
        matches!(
            (self, next),
            (LikeStatus::Pending, LikeStatus::Accepted) | (LikeStatus::Pending, LikeStatus::Rejected)
        )
    }
}

impl fmt::Display for LikeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LikeStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LikeStatus::Pending),
            "accepted" => Ok(LikeStatus::Accepted),
            "rejected" => Ok(LikeStatus::Rejected),
            other => Err(AppError::InternalServerError(format!("Unknown like status '{}'", other))),
        }
    }
}

/// Represents the 'dating_likes' table in the database.
#[derive(Debug, Clone, FromRow)]
pub struct LikeRow {
    pub like_id: i64,
    pub liker_user_id: i64,
    pub liked_user_id: i64,
    pub request_message: Option<String>,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Like {
    pub like_id: i64,
    pub liker_user_id: i64,
    pub liked_user_id: i64,
    pub request_message: Option<String>,
    pub status: LikeStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<LikeRow> for Like {
    type Error = AppError;

    fn try_from(row: LikeRow) -> Result<Self, Self::Error> {
        Ok(Like {
            like_id: row.like_id,
            liker_user_id: row.liker_user_id,
            liked_user_id: row.liked_user_id,
            request_message: row.request_message,
            status: row.status.parse()?,
            created_at: row.created_at,
        })
    }
}
