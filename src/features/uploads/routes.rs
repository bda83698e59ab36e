use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::uploads::handlers::{list_uploads, upload_image};
use crate::features::uploads::services::UploadService;
use crate::shared::constants::{MAX_UPLOAD_SIZE, MULTIPART_OVERHEAD};

/// Create routes for the uploads feature
pub fn routes(upload_service: Arc<UploadService>) -> Router {
    Router::new()
        .route(
            "/api/v1/upload",
            post(upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + MULTIPART_OVERHEAD)),
        )
        .route("/api/v1/uploads", get(list_uploads))
        .with_state(upload_service)
}
