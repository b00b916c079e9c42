use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::core::error::Result;
use crate::modules::storage::DiskStorage;
use crate::shared::types::ErrorBody;

/// Download a report attachment by its generated filename
///
/// No ownership check: attachments are retrievable by name alone.
#[utoipa::path(
    get,
    path = "/uploads/{filename}",
    params(
        ("filename" = String, Path, description = "Generated attachment filename")
    ),
    responses(
        (status = 200, description = "Raw attachment bytes"),
        (status = 404, description = "No attachment under that name", body = ErrorBody)
    ),
    tag = "uploads"
)]
pub async fn download_attachment(
    State(storage): State<Arc<DiskStorage>>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let bytes = storage.get(&filename).await?;
    let content_type = content_type_for(&filename);

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

/// Content type inferred from the stored file extension
fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use base64::prelude::*;
    use serde_json::{json, Value};

    use super::content_type_for;
    use crate::shared::test_helpers::test_app;

    #[test]
    fn test_content_type_for_extension() {
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.gif"), "image/gif");
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[tokio::test]
    async fn submitted_image_round_trips_through_download() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        let image_bytes: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];
        let payload = format!(
            "data:image/png;base64,{}",
            BASE64_STANDARD.encode(image_bytes)
        );

        server
            .post("/api/report")
            .json(&json!({
                "lat": 43.65,
                "lng": -79.38,
                "type": "pothole",
                "description": "big hole",
                "userId": "u1",
                "image": payload
            }))
            .await
            .assert_status_ok();

        let reports: Vec<Value> = server.get("/api/reports").await.json();
        let filename = reports[0]["image"].as_str().expect("attachment filename");
        assert!(filename.ends_with(".png"));

        let download = server.get(&format!("/uploads/{}", filename)).await;
        download.assert_status_ok();
        assert_eq!(download.as_bytes().as_ref(), image_bytes);
        assert_eq!(
            download.header(axum::http::header::CONTENT_TYPE),
            "image/png"
        );
    }

    #[tokio::test]
    async fn invalid_image_encoding_rejects_submission() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/report")
            .json(&json!({
                "lat": 43.65,
                "lng": -79.38,
                "type": "pothole",
                "description": "big hole",
                "userId": "u1",
                "image": "data:image/png;base64,@@not-base64@@"
            }))
            .await;

        response.assert_status_bad_request();

        // The rejected submission left no report behind
        let reports: Vec<Value> = server.get("/api/reports").await.json();
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn unknown_attachment_is_not_found() {
        let (app, _pool) = test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/uploads/1712000000000-missing.jpg").await;
        response.assert_status_not_found();
        assert!(response.json::<Value>()["error"].is_string());
    }
}
