use utoipa::{Modify, OpenApi};

use crate::features::system::{dtos as system_dtos, handlers as system_handlers};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // System
        system_handlers::welcome,
        system_handlers::health_check,
        // Uploads
        uploads_handlers::upload_image,
        uploads_handlers::list_uploads,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // System
            system_dtos::HealthResponseDto,
            system_dtos::WelcomeResponseDto,
            // Uploads
            uploads_dtos::UploadImageDto,
            uploads_dtos::UploadResponseDto,
            uploads_dtos::UploadRecordDto,
            ApiResponse<Vec<uploads_dtos::UploadRecordDto>>,
        )
    ),
    tags(
        (name = "system", description = "Service descriptor and health"),
        (name = "uploads", description = "JPEG image upload with content deduplication"),
    ),
    info(
        title = "Kazibyte API",
        version = "1.0.0",
        description = "API documentation for Kazibyte",
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
