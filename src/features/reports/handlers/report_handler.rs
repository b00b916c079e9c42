use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{
    ReportResponseDto, SubmitReportDto, SubmitReportResponseDto, UserReportsQuery,
};
use crate::features::reports::services::{ReportService, SubmissionService};
use crate::shared::types::ErrorBody;

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
    pub submission_service: Arc<SubmissionService>,
}

/// Submit a geolocated issue report
///
/// The submission is rejected when the location falls outside the service
/// area or when a same-type report already exists within 200 meters.
#[utoipa::path(
    post,
    path = "/api/report",
    request_body = SubmitReportDto,
    responses(
        (status = 200, description = "Report accepted", body = SubmitReportResponseDto),
        (status = 400, description = "Outside service area, duplicate, or invalid payload", body = ErrorBody),
        (status = 500, description = "Persistence failure", body = ErrorBody)
    ),
    tag = "reports"
)]
pub async fn submit_report(
    State(state): State<ReportState>,
    AppJson(dto): AppJson<SubmitReportDto>,
) -> Result<Json<SubmitReportResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = state.submission_service.submit(dto).await?;

    Ok(Json(SubmitReportResponseDto {
        status: "success".to_string(),
        report_id: report.id,
    }))
}

/// List reports that are not yet resolved, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "Active reports", body = Vec<ReportResponseDto>)
    ),
    tag = "reports"
)]
pub async fn list_active_reports(
    State(state): State<ReportState>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    let reports = state.report_service.list_active().await?;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(dtos))
}

/// List every report submitted by one user
///
/// Returns an empty array when the submitter has no reports.
#[utoipa::path(
    get,
    path = "/api/user_reports",
    params(UserReportsQuery),
    responses(
        (status = 200, description = "The submitter's reports", body = Vec<ReportResponseDto>),
        (status = 400, description = "Missing userId parameter", body = ErrorBody)
    ),
    tag = "reports"
)]
pub async fn list_user_reports(
    State(state): State<ReportState>,
    Query(query): Query<UserReportsQuery>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::Validation("userId query parameter is required".to_string()))?;

    let reports = state.report_service.list_by_user(&user_id).await?;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(dtos))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::test_app;

    fn pothole_payload() -> Value {
        json!({
            "lat": 43.65,
            "lng": -79.38,
            "type": "pothole",
            "description": "big hole",
            "userId": "u1"
        })
    }

    #[tokio::test]
    async fn submit_assigns_monotonic_ids() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        let first = server.post("/api/report").json(&pothole_payload()).await;
        first.assert_status_ok();
        let body: Value = first.json();
        assert_eq!(body["status"], "success");
        assert_eq!(body["report_id"], 1);

        let second = server
            .post("/api/report")
            .json(&json!({
                "lat": 43.70,
                "lng": -79.40,
                "type": "streetlight",
                "description": "lamp out",
                "userId": "u2"
            }))
            .await;
        second.assert_status_ok();
        assert_eq!(second.json::<Value>()["report_id"], 2);
    }

    #[tokio::test]
    async fn submit_rejects_location_outside_service_area() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/report")
            .json(&json!({
                "lat": 45.0,
                "lng": -79.38,
                "type": "pothole",
                "description": "big hole",
                "userId": "u1"
            }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"],
            "Location outside service area"
        );

        // Nothing was persisted
        let reports: Vec<Value> = server.get("/api/reports").await.json();
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn submit_rejects_exact_resubmission_as_duplicate() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        server
            .post("/api/report")
            .json(&pothole_payload())
            .await
            .assert_status_ok();

        let second = server.post("/api/report").json(&pothole_payload()).await;
        second.assert_status_bad_request();
        assert_eq!(second.json::<Value>()["error"], "Duplicate report");

        let reports: Vec<Value> = server.get("/api/reports").await.json();
        assert_eq!(reports.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_window_requires_matching_type() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        server
            .post("/api/report")
            .json(&pothole_payload())
            .await
            .assert_status_ok();

        // Same spot, different category
        let response = server
            .post("/api/report")
            .json(&json!({
                "lat": 43.65,
                "lng": -79.38,
                "type": "graffiti",
                "description": "tagged wall",
                "userId": "u1"
            }))
            .await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn duplicate_window_is_two_hundred_meters() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        server
            .post("/api/report")
            .json(&pothole_payload())
            .await
            .assert_status_ok();

        // 0.0025 degrees north is ~277m away: allowed
        let far = server
            .post("/api/report")
            .json(&json!({
                "lat": 43.6525,
                "lng": -79.38,
                "type": "pothole",
                "description": "another hole",
                "userId": "u2"
            }))
            .await;
        far.assert_status_ok();

        // 0.001 degrees is ~111m from the first report: rejected
        let near = server
            .post("/api/report")
            .json(&json!({
                "lat": 43.651,
                "lng": -79.38,
                "type": "pothole",
                "description": "same hole again",
                "userId": "u3"
            }))
            .await;
        near.assert_status_bad_request();
        assert_eq!(near.json::<Value>()["error"], "Duplicate report");
    }

    #[tokio::test]
    async fn submit_rejects_missing_fields() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/report")
            .json(&json!({
                "lat": 43.65,
                "lng": -79.38,
                "type": "pothole"
            }))
            .await;

        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn submit_rejects_empty_type() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/report")
            .json(&json!({
                "lat": 43.65,
                "lng": -79.38,
                "type": "",
                "description": "big hole",
                "userId": "u1"
            }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn active_reports_round_trip_submitted_fields() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        server
            .post("/api/report")
            .json(&pothole_payload())
            .await
            .assert_status_ok();

        let reports: Vec<Value> = server.get("/api/reports").await.json();
        assert_eq!(reports.len(), 1);

        let report = &reports[0];
        assert_eq!(report["id"], 1);
        assert_eq!(report["lat"], 43.65);
        assert_eq!(report["lng"], -79.38);
        assert_eq!(report["type"], "pothole");
        assert_eq!(report["description"], "big hole");
        assert_eq!(report["status"], "Pending");
        assert_eq!(report["userId"], "u1");
        assert_eq!(report["image"], Value::Null);
        assert_eq!(report["notify"], false);
        assert!(report["timestamp"].is_string());
    }

    #[tokio::test]
    async fn active_reports_newest_first() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        server
            .post("/api/report")
            .json(&pothole_payload())
            .await
            .assert_status_ok();
        server
            .post("/api/report")
            .json(&json!({
                "lat": 43.70,
                "lng": -79.40,
                "type": "streetlight",
                "description": "lamp out",
                "userId": "u2"
            }))
            .await
            .assert_status_ok();

        let reports: Vec<Value> = server.get("/api/reports").await.json();
        assert_eq!(reports[0]["id"], 2);
        assert_eq!(reports[1]["id"], 1);
    }

    #[tokio::test]
    async fn active_reports_exclude_resolved() {
        let (app, pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        server
            .post("/api/report")
            .json(&pothole_payload())
            .await
            .assert_status_ok();
        server
            .post("/api/report")
            .json(&json!({
                "lat": 43.70,
                "lng": -79.40,
                "type": "streetlight",
                "description": "lamp out",
                "userId": "u1"
            }))
            .await
            .assert_status_ok();

        // External moderation resolves the first report out of band
        sqlx::query("UPDATE reports SET status = 'Resolved' WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();

        let active: Vec<Value> = server.get("/api/reports").await.json();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0]["id"], 2);

        // The per-user listing has no status filter
        let mine: Vec<Value> = server
            .get("/api/user_reports")
            .add_query_param("userId", "u1")
            .await
            .json();
        assert_eq!(mine.len(), 2);
    }

    #[tokio::test]
    async fn user_reports_filter_by_submitter() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        server
            .post("/api/report")
            .json(&pothole_payload())
            .await
            .assert_status_ok();
        server
            .post("/api/report")
            .json(&json!({
                "lat": 43.70,
                "lng": -79.40,
                "type": "streetlight",
                "description": "lamp out",
                "userId": "u2"
            }))
            .await
            .assert_status_ok();

        let reports: Vec<Value> = server
            .get("/api/user_reports")
            .add_query_param("userId", "u1")
            .await
            .json();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0]["userId"], "u1");
    }

    #[tokio::test]
    async fn user_reports_require_user_id() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/user_reports").await;
        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn user_reports_empty_for_unknown_submitter() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        let reports: Vec<Value> = server
            .get("/api/user_reports")
            .add_query_param("userId", "nobody")
            .await
            .json();

        assert!(reports.is_empty());
    }
}
