// src/store/reports.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::report::{Report, ReportRow, ReportStatus},
};

pub async fn create_report(
    pool: &SqlitePool,
    reporter_user_id: i64,
    message: &str,
    reported_public_id: Option<&str>,
) -> Result<Report, AppError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, ReportRow>(
        r#"
        INSERT INTO reports (reporter_user_id, reported_public_id, report_message, status, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING *
        "#,
    )
    .bind(reporter_user_id)
    .bind(reported_public_id)
    .bind(message)
    .bind(ReportStatus::New.as_str())
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    let report = Report::try_from(row)?;

    tracing::info!("Report {} saved from user {}", report.report_id, reporter_user_id);
    Ok(report)
}

/// Unresolved reports, oldest first.
pub async fn list_new_reports(pool: &SqlitePool, limit: i64) -> Result<Vec<Report>, AppError> {
    let rows = sqlx::query_as::<_, ReportRow>(
        "SELECT * FROM reports WHERE status = ?1 ORDER BY created_at ASC, report_id ASC LIMIT ?2",
    )
    .bind(ReportStatus::New.as_str())
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Report::try_from).collect()
}

/// Marks a report resolved. Returns false if it was unknown or already resolved.
pub async fn resolve_report(pool: &SqlitePool, report_id: i64) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("UPDATE reports SET status = ?1 WHERE report_id = ?2 AND status = ?3")
        .bind(ReportStatus::Resolved.as_str())
        .bind(report_id)
        .bind(ReportStatus::New.as_str())
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}
