use axum::{routing::get, Router};

use crate::features::system::handlers::{health_check, welcome};

/// Root and health routes (no state)
pub fn routes() -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
}
