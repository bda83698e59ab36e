mod content_hash_cache;
mod upload_service;

pub use upload_service::{IncomingImage, UploadService};
