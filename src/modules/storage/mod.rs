//! Storage module for uploaded files
//!
//! Provides the local disk storage client used by the upload pipeline.

mod disk_storage;

pub use disk_storage::DiskStorage;
