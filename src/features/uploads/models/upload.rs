use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for an accepted image upload
#[derive(Debug, Clone, FromRow)]
pub struct Upload {
    pub id: Uuid,
    pub filename: String,
    pub path: String,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Values for a new upload row
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub filename: String,
    pub path: String,
    pub content_hash: String,
}
