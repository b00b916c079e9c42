use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::models::{Report, ReportStatus};

/// Request DTO for submitting a report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportDto {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lng: f64,

    /// Free-form problem category, e.g. "pothole"
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type must not be empty"))]
    pub report_type: String,

    /// Description of the problem
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,

    /// Opaque submitter id; "anonymous" is allowed and not normalized
    pub user_id: String,

    /// Optional photo, base64-encoded (data URLs accepted)
    pub image: Option<String>,

    /// Client notification preference; stored but never acted on
    #[serde(default)]
    pub notify: bool,
}

/// Response DTO for a successful submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitReportResponseDto {
    /// Always "success"
    pub status: String,
    /// The id assigned to the new report
    pub report_id: i64,
}

/// Response DTO for a report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: i64,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub report_type: String,
    pub description: String,
    pub status: ReportStatus,
    pub user_id: String,
    pub image: Option<String>,
    pub notify: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            lat: r.lat,
            lng: r.lng,
            report_type: r.report_type,
            description: r.description,
            status: r.status,
            user_id: r.user_id,
            image: r.image,
            notify: r.notify,
            timestamp: r.timestamp,
        }
    }
}

/// Query parameters for the per-user report listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserReportsQuery {
    /// Submitter id to filter by (exact match)
    pub user_id: Option<String>,
}
