use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::uploads::models::Upload;
use crate::shared::constants::MAX_UPLOAD_SIZE;
use crate::shared::validation::JPEG_FILENAME_REGEX;

/// Upload image request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The JPEG image to upload (`.jpg` or `.jpeg`, at most 2MB)
    #[schema(format = Binary, content_media_type = "image/jpeg")]
    pub file: String,
}

/// Response returned for an accepted upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    pub success: bool,
    #[schema(example = "File uploaded successfully")]
    pub message: String,
    /// Path of the stored file
    #[schema(example = "public/uploads/1718000000000_photo.jpg")]
    pub path: String,
}

impl UploadResponseDto {
    pub fn uploaded(path: String) -> Self {
        Self {
            success: true,
            message: "File uploaded successfully".to_string(),
            path,
        }
    }
}

/// Descriptor of a file after it has been written to disk.
/// Validated before the upload record is persisted.
#[derive(Debug, Clone, Validate)]
pub struct StoredImageDto {
    #[validate(length(min = 1, max = 255, message = "filename must be 1-255 characters"))]
    #[validate(regex(path = *JPEG_FILENAME_REGEX, message = "filename must have a .jpg or .jpeg extension"))]
    pub filename: String,

    #[validate(length(min = 1, message = "path is required"))]
    pub path: String,

    #[validate(range(min = 1, max = MAX_UPLOAD_SIZE, message = "size must be between 1 byte and 2MB"))]
    pub size: usize,
}

/// Persisted upload record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadRecordDto {
    pub id: Uuid,
    pub filename: String,
    pub path: String,
    /// Hex-encoded SHA-256 of the file contents
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<Upload> for UploadRecordDto {
    fn from(upload: Upload) -> Self {
        Self {
            id: upload.id,
            filename: upload.filename,
            path: upload.path,
            content_hash: upload.content_hash,
            created_at: upload.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(filename: &str, path: &str, size: usize) -> StoredImageDto {
        StoredImageDto {
            filename: filename.to_string(),
            path: path.to_string(),
            size,
        }
    }

    #[test]
    fn test_stored_image_valid() {
        let dto = descriptor(
            "1718000000000_photo.jpg",
            "public/uploads/1718000000000_photo.jpg",
            1024,
        );
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_stored_image_rejects_empty_file() {
        let dto = descriptor("1_photo.jpg", "public/uploads/1_photo.jpg", 0);
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("size"));
    }

    #[test]
    fn test_stored_image_rejects_long_or_wrong_filename() {
        let long_name = format!("{}.jpg", "a".repeat(300));
        let dto = descriptor(&long_name, "public/uploads/x.jpg", 10);
        assert!(dto.validate().unwrap_err().field_errors().contains_key("filename"));

        let dto = descriptor("1_photo.png", "public/uploads/1_photo.png", 10);
        assert!(dto.validate().unwrap_err().field_errors().contains_key("filename"));
    }

    #[test]
    fn test_stored_image_requires_path() {
        let dto = descriptor("1_photo.jpg", "", 10);
        assert!(dto.validate().unwrap_err().field_errors().contains_key("path"));
    }
}
