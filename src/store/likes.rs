// src/store/likes.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::like::{Like, LikeRow, LikeStatus},
};

/// Records a pending like from `liker` to `liked`.
/// A second like for the same ordered pair is a `Conflict`.
pub async fn create_like(
    pool: &SqlitePool,
    liker_user_id: i64,
    liked_user_id: i64,
    request_message: Option<&str>,
) -> Result<Like, AppError> {
    if liker_user_id == liked_user_id {
        return Err(AppError::BadRequest("You cannot like your own profile".to_string()));
    }

    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, LikeRow>(
        r#"
        INSERT INTO dating_likes (liker_user_id, liked_user_id, request_message, status, created_at)
        VALUES (?1, ?2, ?3, 'pending', ?4)
        RETURNING *
        "#,
    )
    .bind(liker_user_id)
    .bind(liked_user_id)
    .bind(request_message)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("You already sent a request to this user".to_string())
        }
        _ => AppError::from(e),
    })?;

    tx.commit().await?;

    tracing::info!("User {} liked user {}", liker_user_id, liked_user_id);
    Like::try_from(row)
}

pub async fn get_like(pool: &SqlitePool, like_id: i64) -> Result<Option<Like>, AppError> {
    let row = sqlx::query_as::<_, LikeRow>("SELECT * FROM dating_likes WHERE like_id = ?1")
        .bind(like_id)
        .fetch_optional(pool)
        .await?;

    row.map(Like::try_from).transpose()
}

/// Answers a pending like. Only the liked user may answer, and only once.
pub async fn resolve_like(
    pool: &SqlitePool,
    like_id: i64,
    liked_user_id: i64,
    status: LikeStatus,
) -> Result<Like, AppError> {
    let mut tx = pool.begin().await?;

    let current = sqlx::query_as::<_, LikeRow>(
        "SELECT * FROM dating_likes WHERE like_id = ?1 AND liked_user_id = ?2",
    )
    .bind(like_id)
    .bind(liked_user_id)
    .fetch_optional(&mut *tx)
    .await?
    .map(Like::try_from)
    .transpose()?
    .ok_or(AppError::NotFound("Request not found".to_string()))?;

    if !current.status.can_become(status) {
        return Err(AppError::Conflict(format!(
            "Request was already {}",
            current.status
        )));
    }

    let row = sqlx::query_as::<_, LikeRow>(
        r#"
        UPDATE dating_likes SET status = ?1
        WHERE like_id = ?2 AND status = 'pending'
        RETURNING *
        "#,
    )
    .bind(status.as_str())
    .bind(like_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Like {} marked {}", like_id, status);
    Like::try_from(row)
}
