use axum::Json;

use crate::features::system::dtos::{HealthResponseDto, WelcomeResponseDto};

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is up", body = HealthResponseDto)
    )
)]
pub async fn health_check() -> Json<HealthResponseDto> {
    Json(HealthResponseDto::up())
}

/// Service descriptor
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Welcome message and project links", body = WelcomeResponseDto)
    )
)]
pub async fn welcome() -> Json<WelcomeResponseDto> {
    Json(WelcomeResponseDto::default())
}
