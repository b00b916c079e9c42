use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::uploads::handlers;
use crate::modules::storage::DiskStorage;

/// Create routes for attachment downloads
pub fn routes(storage: Arc<DiskStorage>) -> Router {
    Router::new()
        .route("/uploads/{filename}", get(handlers::download_attachment))
        .with_state(storage)
}
