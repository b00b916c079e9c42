use chrono::Utc;
use sqlx::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, Report, ReportStatus};

/// Service for report persistence and queries
///
/// Rows are append-only. Id assignment is delegated to SQLite's
/// AUTOINCREMENT, which serializes concurrent inserts and never reuses an
/// id, so two racing submissions cannot collide.
pub struct ReportService {
    pool: SqlitePool,
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new report and return it with its assigned id
    ///
    /// The row is committed before this returns.
    pub async fn create(&self, data: &CreateReport) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (lat, lng, type, description, status, user_id, image, notify, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            RETURNING id, lat, lng, type, description, status, user_id, image, notify, timestamp
            "#,
        )
        .bind(data.lat)
        .bind(data.lng)
        .bind(&data.report_type)
        .bind(&data.description)
        .bind(ReportStatus::Pending)
        .bind(&data.user_id)
        .bind(&data.image)
        .bind(data.notify)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created report {} ({}) by user {}",
            report.id,
            report.report_type,
            report.user_id
        );

        Ok(report)
    }

    /// Reports not yet resolved, newest first
    pub async fn list_active(&self) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, lat, lng, type, description, status, user_id, image, notify, timestamp
            FROM reports
            WHERE status != ?1
            ORDER BY id DESC
            "#,
        )
        .bind(ReportStatus::Resolved)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list active reports: {:?}", e);
            AppError::Database(e)
        })
    }

    /// Every report by one submitter, in submission order
    ///
    /// The match is exact; "anonymous" and "" are distinct submitters.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, lat, lng, type, description, status, user_id, image, notify, timestamp
            FROM reports
            WHERE user_id = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports for user {}: {:?}", user_id, e);
            AppError::Database(e)
        })
    }

    /// Every report regardless of status; feeds the duplicate scan
    pub async fn list_all(&self) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, lat, lng, type, description, status, user_id, image, notify, timestamp
            FROM reports
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list reports: {:?}", e);
            AppError::Database(e)
        })
    }
}
