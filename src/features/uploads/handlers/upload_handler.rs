use axum::{
    extract::{multipart::MultipartError, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppMultipart;
use crate::features::uploads::dtos::{UploadImageDto, UploadRecordDto, UploadResponseDto};
use crate::features::uploads::services::{IncomingImage, UploadService};
use crate::shared::constants::UPLOAD_FIELD_NAME;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

fn multipart_error(e: MultipartError) -> AppError {
    debug!("Failed to read multipart data: {}", e);
    AppError::Multipart(e.to_string())
}

/// Upload a JPEG image
///
/// Accepts multipart/form-data with a single `file` part holding a
/// `.jpg`/`.jpeg` image of at most 2MB. Identical content is only
/// accepted once.
#[utoipa::path(
    post,
    path = "/api/v1/upload",
    tag = "uploads",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Multipart form with a single `file` field",
    ),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponseDto),
        (status = 400, description = "Missing file, wrong file type, duplicate content or invalid descriptor"),
        (status = 500, description = "Multipart transport error (size limit, unexpected field)")
    )
)]
pub async fn upload_image(
    State(service): State<Arc<UploadService>>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Json<UploadResponseDto>> {
    let mut image: Option<IncomingImage> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        // Plain text fields are not part of the upload
        let Some(file_name) = field.file_name().map(|s| s.to_string()) else {
            debug!("Ignoring non-file field: {}", field_name);
            continue;
        };

        if field_name != UPLOAD_FIELD_NAME || image.is_some() {
            return Err(AppError::Multipart(format!(
                "Unexpected field '{}'",
                field_name
            )));
        }

        // Filter on the name before reading any content
        UploadService::check_file_type(&file_name)?;

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            UploadService::check_size(data.len() + chunk.len())?;
            data.extend_from_slice(&chunk);
        }

        image = Some(IncomingImage {
            original_filename: file_name,
            data,
        });
    }

    let image = image.ok_or_else(|| AppError::BadRequest("File not found".to_string()))?;
    let response = service.upload_image(image).await?;

    Ok(Json(response))
}

/// List uploaded images, newest first
#[utoipa::path(
    get,
    path = "/api/v1/uploads",
    tag = "uploads",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Upload records", body = ApiResponse<Vec<UploadRecordDto>>)
    )
)]
pub async fn list_uploads(
    State(service): State<Arc<UploadService>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<UploadRecordDto>>>> {
    let (uploads, total) = service.list_uploads(&query).await?;

    Ok(Json(ApiResponse::success(
        Some(uploads),
        None,
        Some(Meta { total }),
    )))
}
