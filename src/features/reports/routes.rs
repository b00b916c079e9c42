use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{ReportService, SubmissionService};

/// Create routes for the reports feature
pub fn routes(
    report_service: Arc<ReportService>,
    submission_service: Arc<SubmissionService>,
) -> Router {
    let state = ReportState {
        report_service,
        submission_service,
    };

    Router::new()
        .route("/api/report", post(handlers::submit_report))
        .route("/api/reports", get(handlers::list_active_reports))
        .route("/api/user_reports", get(handlers::list_user_reports))
        .with_state(state)
}
