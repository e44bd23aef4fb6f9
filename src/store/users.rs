// src/store/users.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::user::{BotStats, Sender, User},
};

const USER_COLUMNS: &str = "telegram_id, username, first_name, last_name, is_banned, created_at";

/// Gets the user for `sender`, creating it on first contact.
///
/// One upsert statement, so overlapping first contacts cannot collide on the key.
/// Display fields are refreshed on every contact. Returns `None` for banned
/// identities, whose row is left untouched.
pub async fn get_or_create_user(pool: &SqlitePool, sender: &Sender) -> Result<Option<User>, AppError> {
    let mut tx = pool.begin().await?;

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (telegram_id, username, first_name, last_name, is_banned, created_at)
        VALUES (?1, ?2, ?3, ?4, 0, ?5)
        ON CONFLICT (telegram_id) DO UPDATE
        SET username = excluded.username,
            first_name = excluded.first_name,
            last_name = excluded.last_name
        WHERE users.is_banned = 0
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(sender.id)
    .bind(&sender.username)
    .bind(&sender.first_name)
    .bind(&sender.last_name)
    .bind(Utc::now())
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;

    if user.is_none() {
        tracing::debug!("User {} is banned", sender.id);
    }
    Ok(user)
}

/// Point lookup that ignores the ban flag (admin use and notifications).
pub async fn get_user(pool: &SqlitePool, telegram_id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE telegram_id = ?1",
        USER_COLUMNS
    ))
    .bind(telegram_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Sets the ban flag. Returns false when the user is unknown.
pub async fn set_banned(pool: &SqlitePool, telegram_id: i64, banned: bool) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("UPDATE users SET is_banned = ?1 WHERE telegram_id = ?2")
        .bind(banned)
        .bind(telegram_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    let found = result.rows_affected() > 0;
    if found {
        tracing::info!("User {} ban flag set to {}", telegram_id, banned);
    }
    Ok(found)
}

/// Ids of every user that is not banned, oldest first.
pub async fn active_user_ids(pool: &SqlitePool) -> Result<Vec<i64>, AppError> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT telegram_id FROM users WHERE is_banned = 0 ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

pub async fn bot_stats(pool: &SqlitePool) -> Result<BotStats, AppError> {
    let row: (i64, i64, i64, i64, i64, i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM users),
            (SELECT COUNT(*) FROM users WHERE is_banned = 1),
            (SELECT COUNT(*) FROM dating_profiles),
            (SELECT COUNT(*) FROM freelancer_profiles),
            (SELECT COUNT(*) FROM client_profiles),
            (SELECT COUNT(*) FROM dating_likes WHERE status = 'pending'),
            (SELECT COUNT(*) FROM dating_likes WHERE status = 'accepted'),
            (SELECT COUNT(*) FROM reports WHERE status = 'new')
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(BotStats {
        users: row.0,
        banned_users: row.1,
        dating_profiles: row.2,
        freelancer_profiles: row.3,
        client_profiles: row.4,
        pending_likes: row.5,
        accepted_likes: row.6,
        new_reports: row.7,
    })
}
