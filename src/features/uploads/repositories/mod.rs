mod upload_repository;

pub use upload_repository::{CreateUploadOutcome, PgUploadRepository, UploadRepository};
