#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use axum::Router;
#[cfg(test)]
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::core::config::StorageConfig;
#[cfg(test)]
use crate::features::reports::{routes as reports_routes, ReportService, SubmissionService};
#[cfg(test)]
use crate::features::uploads::routes as uploads_routes;
#[cfg(test)]
use crate::modules::storage::DiskStorage;

/// Build the full API router against an in-memory database and a
/// throwaway upload directory.
///
/// The pool is returned too so tests can stage out-of-band state, such as
/// a report resolved by external moderation.
#[cfg(test)]
pub async fn test_app() -> (Router, SqlitePool) {
    // A single connection keeps every query on the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let storage_config = StorageConfig {
        upload_dir: std::env::temp_dir()
            .join(format!("cityreport-test-{}", Uuid::new_v4().simple()))
            .to_string_lossy()
            .into_owned(),
    };
    let storage = Arc::new(DiskStorage::new(&storage_config));
    storage.ensure_dir_exists().await.expect("upload dir");

    let report_service = Arc::new(ReportService::new(pool.clone()));
    let submission_service = Arc::new(SubmissionService::new(
        Arc::clone(&report_service),
        Arc::clone(&storage),
    ));

    let app = Router::new()
        .merge(reports_routes::routes(report_service, submission_service))
        .merge(uploads_routes::routes(storage));

    (app, pool)
}
