use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Report status enum matching the stored TEXT values
///
/// Reports start as `Pending`; only external moderation marks them
/// `Resolved`, never this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
pub enum ReportStatus {
    Pending,
    Resolved,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "Pending"),
            ReportStatus::Resolved => write!(f, "Resolved"),
        }
    }
}

/// Database model for a citizen report
///
/// Rows are append-only: id, coordinates, type, submitter and timestamp are
/// immutable once written.
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: i64,
    pub lat: f64,
    pub lng: f64,
    #[sqlx(rename = "type")]
    pub report_type: String,
    pub description: String,
    pub status: ReportStatus,
    pub user_id: String,
    pub image: Option<String>,
    pub notify: bool,
    pub timestamp: DateTime<Utc>,
}

/// Data for creating a new report
#[derive(Debug)]
pub struct CreateReport {
    pub lat: f64,
    pub lng: f64,
    pub report_type: String,
    pub description: String,
    pub user_id: String,
    pub image: Option<String>,
    pub notify: bool,
}
