/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// UPLOAD LIMITS
// =============================================================================

/// Maximum accepted image size in bytes (2MB)
pub const MAX_UPLOAD_SIZE: usize = 2 * 1024 * 1024;

/// Extra request body allowance for multipart boundaries and headers
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Longest stored file name accepted, in bytes (common filesystem limit)
pub const MAX_STORED_FILENAME_BYTES: usize = 255;

/// Multipart field that carries the uploaded image
pub const UPLOAD_FIELD_NAME: &str = "file";

// =============================================================================
// SERVICE DESCRIPTOR
// =============================================================================

pub const API_VERSION: &str = "1.0.0";
pub const API_AUTHOR: &str = "ExzoBaidulKazi";
pub const API_GITHUB_URL: &str = "https://github.com/ExzoBaidulKazi";
pub const API_DOCS_URL: &str = "https://github.com/ExzoBaidulKazi/kazibyte_api";
pub const API_CONTACT_URL: &str = "https://github.com/ExzoBaidulKazi/kazibyte_api";
