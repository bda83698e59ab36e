//! Local disk storage for uploaded images
//!
//! Files are written once under the configured upload directory and are
//! never overwritten: a name collision is reported as an error.

use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::core::error::AppError;

/// Disk-backed storage client
pub struct DiskStorage {
    upload_dir: PathBuf,
}

impl DiskStorage {
    /// Create the storage client, creating the upload directory if needed
    pub async fn new(config: &StorageConfig) -> Result<Self, AppError> {
        fs::create_dir_all(&config.upload_dir).await?;

        info!(
            "Disk storage initialized at: {}",
            config.upload_dir.display()
        );

        Ok(Self {
            upload_dir: config.upload_dir.clone(),
        })
    }

    /// Generate a stored file name: `<unix millis>_<original name>`
    ///
    /// Any directory components in the client-supplied name are dropped.
    pub fn generate_key(&self, original_filename: &str) -> String {
        format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            base_name(original_filename)
        )
    }

    /// Full path a key is stored at
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.upload_dir.join(key)
    }

    /// Write a new file and return its path
    ///
    /// Fails with `AlreadyExists` if the key is already taken.
    pub async fn upload(&self, key: &str, data: &[u8]) -> Result<PathBuf, AppError> {
        let path = self.path_for(key);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(data).await?;
        file.flush().await?;

        debug!("Stored file '{}' ({} bytes)", path.display(), data.len());
        Ok(path)
    }

    /// Delete a stored file. A file that is already gone is not an error.
    pub async fn delete(&self, path: &Path) -> Result<(), AppError> {
        match fs::remove_file(path).await {
            Ok(()) => {
                debug!("Deleted file '{}'", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("File '{}' was already removed", path.display());
                Ok(())
            }
            Err(e) => Err(AppError::Storage(e)),
        }
    }

    /// Check if a file exists
    #[cfg(test)]
    pub async fn exists(&self, path: &Path) -> Result<bool, AppError> {
        Ok(fs::try_exists(path).await?)
    }
}

/// Last path component of a client-supplied filename (handles `/` and `\`)
fn base_name(filename: &str) -> &str {
    filename.rsplit(['/', '\\']).next().unwrap_or(filename)
}
