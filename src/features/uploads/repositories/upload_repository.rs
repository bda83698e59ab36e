use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::uploads::models::{NewUpload, Upload};

/// Outcome of inserting an upload row
#[derive(Debug)]
pub enum CreateUploadOutcome {
    Created(Upload),
    /// A row with the same content hash already exists
    DuplicateContent,
}

/// Persistence for upload records
#[async_trait]
pub trait UploadRepository: Send + Sync {
    async fn create(&self, upload: NewUpload) -> Result<CreateUploadOutcome>;

    /// List records newest first
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Upload>>;

    async fn count(&self) -> Result<i64>;
}

/// Postgres-backed upload repository
pub struct PgUploadRepository {
    pool: PgPool,
}

impl PgUploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadRepository for PgUploadRepository {
    async fn create(&self, upload: NewUpload) -> Result<CreateUploadOutcome> {
        let result = sqlx::query_as::<_, Upload>(
            r#"
            INSERT INTO uploads (id, filename, path, content_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, filename, path, content_hash, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&upload.filename)
        .bind(&upload.path)
        .bind(&upload.content_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(CreateUploadOutcome::Created(row)),
            Err(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => {
                tracing::warn!(
                    "Upload with content hash {} already persisted",
                    upload.content_hash
                );
                Ok(CreateUploadOutcome::DuplicateContent)
            }
            Err(e) => {
                tracing::error!("Failed to create upload record: {:?}", e);
                Err(e.into())
            }
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Upload>> {
        let rows = sqlx::query_as::<_, Upload>(
            r#"
            SELECT id, filename, path, content_hash, created_at
            FROM uploads
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM uploads")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
