use std::sync::Arc;

use base64::prelude::*;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::SubmitReportDto;
use crate::features::reports::models::{CreateReport, Report};
use crate::features::reports::services::ReportService;
use crate::modules::storage::DiskStorage;

/// Service-area bounding box, degrees
const LAT_MIN: f64 = 43.58;
const LAT_MAX: f64 = 43.86;
const LNG_MIN: f64 = -79.64;
const LNG_MAX: f64 = -79.11;

/// Radius within which a same-type report counts as a duplicate
const DUPLICATE_RADIUS_METERS: f64 = 200.0;

/// Planar degrees-to-meters approximation factor
const METERS_PER_DEGREE: f64 = 111_000.0;

/// Validation and submission pipeline for new reports
///
/// Order matters: geofence, then duplicate scan, then attachment write,
/// then the row insert. A rejected submission therefore leaves neither a
/// report row nor an orphaned attachment behind.
pub struct SubmissionService {
    report_service: Arc<ReportService>,
    storage: Arc<DiskStorage>,
}

impl SubmissionService {
    pub fn new(report_service: Arc<ReportService>, storage: Arc<DiskStorage>) -> Self {
        Self {
            report_service,
            storage,
        }
    }

    /// Planar-approximation distance in meters
    ///
    /// Deliberately not great-circle: the service area is small enough that
    /// the flat projection holds, and the stored reports were written with
    /// the same approximation.
    pub fn planar_distance_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
        let d_lat = lat1 - lat2;
        let d_lng = lng1 - lng2;
        (d_lat * d_lat + d_lng * d_lng).sqrt() * METERS_PER_DEGREE
    }

    /// Whether the point falls inside the fixed service-area bounding box
    pub fn in_service_area(lat: f64, lng: f64) -> bool {
        (LAT_MIN..=LAT_MAX).contains(&lat) && (LNG_MIN..=LNG_MAX).contains(&lng)
    }

    /// Run the full submission pipeline and persist the report
    pub async fn submit(&self, dto: SubmitReportDto) -> Result<Report> {
        if !Self::in_service_area(dto.lat, dto.lng) {
            return Err(AppError::OutOfServiceArea);
        }

        // Linear scan over every report, any status. Fine at municipal
        // scale; a (lat, lng, type) bucket index is the next step if the
        // report volume outgrows it.
        let existing = self.report_service.list_all().await?;
        let duplicate = existing.iter().any(|r| {
            r.report_type == dto.report_type
                && Self::planar_distance_meters(r.lat, r.lng, dto.lat, dto.lng)
                    < DUPLICATE_RADIUS_METERS
        });
        if duplicate {
            return Err(AppError::DuplicateReport);
        }

        let image = match dto.image.as_deref() {
            Some(payload) if !payload.is_empty() => Some(self.store_attachment(payload).await?),
            _ => None,
        };

        let create = CreateReport {
            lat: dto.lat,
            lng: dto.lng,
            report_type: dto.report_type,
            description: dto.description,
            user_id: dto.user_id,
            image,
            notify: dto.notify,
        };

        self.report_service.create(&create).await
    }

    /// Decode the transport encoding and hand the bytes to the blob store
    ///
    /// Clients send either a bare base64 string or a full data URL
    /// (`data:image/png;base64,...`).
    async fn store_attachment(&self, payload: &str) -> Result<String> {
        let (extension, encoded) = match payload.strip_prefix("data:") {
            Some(rest) => {
                let (mime, data) = rest
                    .split_once(";base64,")
                    .ok_or_else(|| AppError::Validation("Invalid image encoding".to_string()))?;
                (extension_for_mime(mime), data)
            }
            None => ("jpg", payload),
        };

        let bytes = BASE64_STANDARD
            .decode(encoded.trim())
            .map_err(|_| AppError::Validation("Invalid image encoding".to_string()))?;

        self.storage.put(&bytes, extension).await
    }
}

/// File extension for a data-URL mime type; jpg is the legacy fallback
fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "jpg",
    }
}
