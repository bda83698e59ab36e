use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::{system, uploads::{self, UploadService}};

/// Build the application router with all routes and layers
pub fn build_router(config: &Config, upload_service: Arc<UploadService>) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    Router::new()
        .merge(swagger)
        .merge(system::routes())
        .merge(uploads::routes(upload_service))
        // Anything not routed is looked up in the public directory
        .fallback_service(ServeDir::new(&config.storage.public_dir))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::uploads::dtos::UploadResponseDto;
    use crate::modules::storage::DiskStorage;
    use crate::shared::constants::MAX_UPLOAD_SIZE;
    use crate::shared::test_helpers::{jpeg_bytes, test_config, InMemoryUploadRepository};
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::path::Path;
    use tempfile::TempDir;

    struct TestApp {
        server: TestServer,
        repository: Arc<InMemoryUploadRepository>,
        dir: TempDir,
    }

    impl TestApp {
        async fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let config = test_config(dir.path());
            let storage = DiskStorage::new(&config.storage).await.unwrap();
            let repository = Arc::new(InMemoryUploadRepository::new());
            let service = Arc::new(UploadService::new(repository.clone(), Arc::new(storage)));

            let server = TestServer::new(build_router(&config, service)).unwrap();

            Self {
                server,
                repository,
                dir,
            }
        }

        fn stored_files(&self) -> usize {
            std::fs::read_dir(self.dir.path().join("uploads"))
                .unwrap()
                .count()
        }

        async fn upload(&self, field: &str, file_name: &str, data: Vec<u8>) -> axum_test::TestResponse {
            let part = Part::bytes(data)
                .file_name(file_name)
                .mime_type("image/jpeg");
            self.server
                .post("/api/v1/upload")
                .multipart(MultipartForm::new().add_part(field, part))
                .await
        }
    }

    #[tokio::test]
    async fn test_health_returns_up() {
        let app = TestApp::new().await;

        let response = app.server.get("/health").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "UP" }));
    }

    #[tokio::test]
    async fn test_root_returns_descriptor() {
        let app = TestApp::new().await;

        let response = app.server.get("/").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "Success");
        assert_eq!(body["message"], "Welcome to Kazibyte API");
        assert_eq!(body["version"], "1.0.0");
        assert!(body["github"].is_string());
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let app = TestApp::new().await;

        let response = app.server.get("/health").await;

        let request_id = response.header("x-request-id");
        assert!(!request_id.is_empty());
    }

    #[tokio::test]
    async fn test_upload_rejects_non_jpeg_without_writing() {
        let app = TestApp::new().await;

        let response = app.upload("file", "photo.png", jpeg_bytes(1024, 1)).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Only JPG files are allowed!");
        assert_eq!(app.stored_files(), 0);
        assert!(app.repository.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_scenario() {
        let app = TestApp::new().await;
        let one_mb = jpeg_bytes(1024 * 1024, 42);

        // Accepted
        let response = app.upload("file", "photo.jpg", one_mb.clone()).await;
        response.assert_status_ok();
        let body: UploadResponseDto = response.json();
        assert!(body.success);
        assert_eq!(body.message, "File uploaded successfully");
        assert!(Path::new(&body.path).exists());

        let records = app.repository.all().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, body.path);

        // Stored image is reachable as a static file
        let served = app
            .server
            .get(&format!("/uploads/{}", records[0].filename))
            .await;
        served.assert_status_ok();
        assert_eq!(served.as_bytes().len(), one_mb.len());

        // Same bytes under another name
        let response = app.upload("file", "other.jpg", one_mb).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "File already exists");
        assert_eq!(app.stored_files(), 1);
        assert_eq!(app.repository.all().await.len(), 1);

        // Above the body limit
        let response = app
            .upload("file", "photo.jpg", jpeg_bytes(3 * 1024 * 1024, 5))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app.stored_files(), 1);
        assert_eq!(app.repository.all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_rejects_just_over_ceiling() {
        let app = TestApp::new().await;

        let response = app
            .upload("file", "big.jpg", jpeg_bytes(MAX_UPLOAD_SIZE + 1, 2))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(app.stored_files(), 0);
        assert!(app.repository.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_accepts_exactly_ceiling() {
        let app = TestApp::new().await;

        let response = app
            .upload("file", "max.jpeg", jpeg_bytes(MAX_UPLOAD_SIZE, 4))
            .await;

        response.assert_status_ok();
        assert_eq!(app.stored_files(), 1);
    }

    #[tokio::test]
    async fn test_upload_rejects_overlong_filename() {
        let app = TestApp::new().await;
        let name = format!("{}.jpg", "a".repeat(246));

        let response = app.upload("file", &name, jpeg_bytes(256, 8)).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(app.stored_files(), 0);
        assert!(app.repository.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_upload_without_file_part() {
        let app = TestApp::new().await;

        let response = app
            .server
            .post("/api/v1/upload")
            .multipart(MultipartForm::new().add_text("note", "no image here"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "File not found");
    }

    #[tokio::test]
    async fn test_upload_non_multipart_body() {
        let app = TestApp::new().await;

        let response = app.server.post("/api/v1/upload").text("hello").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "File not found");
    }

    #[tokio::test]
    async fn test_upload_unexpected_file_field() {
        let app = TestApp::new().await;

        let response = app.upload("image", "photo.jpg", jpeg_bytes(128, 1)).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app.stored_files(), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_second_file_part() {
        let app = TestApp::new().await;

        let form = MultipartForm::new()
            .add_part("file", Part::bytes(jpeg_bytes(128, 1)).file_name("a.jpg"))
            .add_part("file", Part::bytes(jpeg_bytes(128, 2)).file_name("b.jpg"));
        let response = app.server.post("/api/v1/upload").multipart(form).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app.stored_files(), 0);
        assert!(app.repository.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_uploads() {
        let app = TestApp::new().await;
        app.upload("file", "first.jpg", jpeg_bytes(256, 1))
            .await
            .assert_status_ok();
        app.upload("file", "second.jpg", jpeg_bytes(256, 2))
            .await
            .assert_status_ok();

        let response = app.server.get("/api/v1/uploads?page=1&page_size=10").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["meta"]["total"], 2);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert!(data[0]["filename"].as_str().unwrap().ends_with("_second.jpg"));
    }

    #[tokio::test]
    async fn test_openapi_json_is_served() {
        let app = TestApp::new().await;

        let response = app.server.get("/api-docs/openapi.json").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["info"]["title"], "Kazibyte API");
    }
}
