use utoipa::{Modify, OpenApi};

use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::uploads::handlers as uploads_handlers;
use crate::shared::types::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::report_handler::submit_report,
        reports_handlers::report_handler::list_active_reports,
        reports_handlers::report_handler::list_user_reports,
        // Uploads
        uploads_handlers::attachment_handler::download_attachment,
    ),
    components(
        schemas(
            // Shared
            ErrorBody,
            // Reports
            reports_models::ReportStatus,
            reports_dtos::SubmitReportDto,
            reports_dtos::SubmitReportResponseDto,
            reports_dtos::ReportResponseDto,
        )
    ),
    tags(
        (name = "reports", description = "Citizen report submission and queries"),
        (name = "uploads", description = "Report attachment downloads"),
    ),
    info(
        title = "CityReport API",
        version = "0.1.0",
        description = "API documentation for the municipal issue-reporting service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
