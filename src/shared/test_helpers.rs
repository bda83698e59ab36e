#[cfg(test)]
use crate::core::config::{AppConfig, Config, DatabaseConfig, StorageConfig, SwaggerConfig};
#[cfg(test)]
use crate::core::error::Result;
#[cfg(test)]
use crate::features::uploads::models::{NewUpload, Upload};
#[cfg(test)]
use crate::features::uploads::repositories::{CreateUploadOutcome, UploadRepository};
#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use std::path::Path;
#[cfg(test)]
use tokio::sync::Mutex;

/// Upload repository kept in memory, enforcing unique content hashes
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryUploadRepository {
    uploads: Mutex<Vec<Upload>>,
}

#[cfg(test)]
impl InMemoryUploadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Upload> {
        self.uploads.lock().await.clone()
    }

    /// Insert a row directly, as if persisted by an earlier process
    pub async fn seed(&self, upload: NewUpload) {
        self.create(upload).await.unwrap();
    }
}

#[cfg(test)]
#[async_trait]
impl UploadRepository for InMemoryUploadRepository {
    async fn create(&self, upload: NewUpload) -> Result<CreateUploadOutcome> {
        let mut uploads = self.uploads.lock().await;
        if uploads
            .iter()
            .any(|existing| existing.content_hash == upload.content_hash)
        {
            return Ok(CreateUploadOutcome::DuplicateContent);
        }

        let row = Upload {
            id: uuid::Uuid::now_v7(),
            filename: upload.filename,
            path: upload.path,
            content_hash: upload.content_hash,
            created_at: chrono::Utc::now(),
        };
        uploads.push(row.clone());
        Ok(CreateUploadOutcome::Created(row))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Upload>> {
        let uploads = self.uploads.lock().await;
        Ok(uploads
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.uploads.lock().await.len() as i64)
    }
}

/// Config pointing storage at a scratch directory
#[cfg(test)]
pub fn test_config(dir: &Path) -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            service_name: "kazibyte_api_test".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgres://localhost/unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_secs: 1,
            idle_timeout_secs: 1,
            max_lifetime_secs: 1,
        },
        storage: StorageConfig {
            public_dir: dir.to_path_buf(),
            upload_dir: dir.join("uploads"),
        },
        swagger: SwaggerConfig {
            title: "Kazibyte API".to_string(),
            version: "test".to_string(),
            description: "test".to_string(),
        },
    }
}

/// JPEG-framed bytes of the given length; different seeds give different content
#[cfg(test)]
pub fn jpeg_bytes(len: usize, seed: u8) -> Vec<u8> {
    let mut data: Vec<u8> = (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect();
    if len >= 4 {
        data[..2].copy_from_slice(&[0xFF, 0xD8]);
        data[len - 2..].copy_from_slice(&[0xFF, 0xD9]);
    }
    data
}
