use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{StoredImageDto, UploadRecordDto, UploadResponseDto};
use crate::features::uploads::models::NewUpload;
use crate::features::uploads::repositories::{CreateUploadOutcome, UploadRepository};
use crate::features::uploads::services::content_hash_cache::{content_digest, ContentHashCache};
use crate::modules::storage::DiskStorage;
use crate::shared::constants::{MAX_STORED_FILENAME_BYTES, MAX_UPLOAD_SIZE};
use crate::shared::types::PaginationQuery;
use crate::shared::validation::is_jpeg_filename;

/// An image received from the client, fully buffered
#[derive(Debug)]
pub struct IncomingImage {
    pub original_filename: String,
    pub data: Vec<u8>,
}

enum Persisted {
    Created(UploadResponseDto),
    DuplicateContent,
}

/// Service running the image intake pipeline:
/// filter -> hash check -> disk write -> descriptor validation -> persistence
pub struct UploadService {
    repository: Arc<dyn UploadRepository>,
    storage: Arc<DiskStorage>,
    hash_cache: ContentHashCache,
}

impl UploadService {
    pub fn new(repository: Arc<dyn UploadRepository>, storage: Arc<DiskStorage>) -> Self {
        Self {
            repository,
            storage,
            hash_cache: ContentHashCache::new(),
        }
    }

    /// Reject filenames that do not carry a JPEG extension
    pub fn check_file_type(filename: &str) -> Result<()> {
        if is_jpeg_filename(filename) {
            Ok(())
        } else {
            debug!("Rejected non-JPEG upload: {}", filename);
            Err(AppError::BadRequest("Only JPG files are allowed!".to_string()))
        }
    }

    /// Reject payloads above the upload ceiling
    pub fn check_size(size: usize) -> Result<()> {
        if size > MAX_UPLOAD_SIZE {
            return Err(AppError::Multipart(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                MAX_UPLOAD_SIZE,
                MAX_UPLOAD_SIZE / 1024 / 1024
            )));
        }
        Ok(())
    }

    fn duplicate_error() -> AppError {
        AppError::BadRequest("File already exists".to_string())
    }

    /// Accept an image: deduplicate by content, store it, and record it
    ///
    /// # Returns
    /// The success response echoing the stored file path
    pub async fn upload_image(&self, image: IncomingImage) -> Result<UploadResponseDto> {
        Self::check_file_type(&image.original_filename)?;
        Self::check_size(image.data.len())?;

        let digest = content_digest(&image.data);
        if !self.hash_cache.reserve(&digest).await {
            info!(
                "Duplicate upload rejected: filename={}, hash={}",
                image.original_filename, digest
            );
            return Err(Self::duplicate_error());
        }

        match self.store_and_persist(&digest, image).await {
            Ok(Persisted::Created(response)) => Ok(response),
            // Already persisted by an earlier process; keep the digest cached
            Ok(Persisted::DuplicateContent) => Err(Self::duplicate_error()),
            Err(e) => {
                self.hash_cache.release(&digest).await;
                Err(e)
            }
        }
    }

    async fn store_and_persist(&self, digest: &str, image: IncomingImage) -> Result<Persisted> {
        let key = self.storage.generate_key(&image.original_filename);

        // Reject names the filesystem would refuse before anything is written
        Self::validate_descriptor(&StoredImageDto {
            filename: key.clone(),
            path: self.storage.path_for(&key).to_string_lossy().into_owned(),
            size: image.data.len(),
        })?;

        let path = self.storage.upload(&key, &image.data).await?;

        let Some(path_str) = path.to_str() else {
            self.discard(&path).await;
            return Err(AppError::Internal(format!(
                "Stored path is not valid UTF-8: {}",
                path.display()
            )));
        };

        let descriptor = StoredImageDto {
            filename: key,
            path: path_str.to_string(),
            size: image.data.len(),
        };

        if let Err(e) = Self::validate_descriptor(&descriptor) {
            self.discard(&path).await;
            return Err(e);
        }

        let outcome = match self
            .repository
            .create(NewUpload {
                filename: descriptor.filename,
                path: descriptor.path,
                content_hash: digest.to_string(),
            })
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                self.discard(&path).await;
                return Err(e);
            }
        };

        match outcome {
            CreateUploadOutcome::Created(upload) => {
                info!(
                    "Upload saved: id={}, filename={}, hash={}",
                    upload.id, upload.filename, upload.content_hash
                );
                Ok(Persisted::Created(UploadResponseDto::uploaded(upload.path)))
            }
            CreateUploadOutcome::DuplicateContent => {
                self.discard(&path).await;
                Ok(Persisted::DuplicateContent)
            }
        }
    }

    /// Check a stored-file descriptor against the schema and the
    /// filesystem name limit (counted in bytes)
    fn validate_descriptor(descriptor: &StoredImageDto) -> Result<()> {
        if descriptor.filename.len() > MAX_STORED_FILENAME_BYTES {
            return Err(AppError::Validation(format!(
                "filename must not exceed {} bytes",
                MAX_STORED_FILENAME_BYTES
            )));
        }

        descriptor
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))
    }

    /// Remove a stored file after a later pipeline step failed
    async fn discard(&self, path: &Path) {
        if let Err(e) = self.storage.delete(path).await {
            warn!("Failed to remove rejected file '{}': {}", path.display(), e);
        }
    }

    /// List persisted upload records, newest first
    pub async fn list_uploads(
        &self,
        query: &PaginationQuery,
    ) -> Result<(Vec<UploadRecordDto>, i64)> {
        let uploads = self
            .repository
            .list(query.limit(), query.offset())
            .await?;
        let total = self.repository.count().await?;

        Ok((uploads.into_iter().map(Into::into).collect(), total))
    }
}
