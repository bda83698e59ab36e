use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{
    API_AUTHOR, API_CONTACT_URL, API_DOCS_URL, API_GITHUB_URL, API_VERSION,
};

/// Liveness response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponseDto {
    #[schema(example = "UP")]
    pub status: String,
}

impl HealthResponseDto {
    pub fn up() -> Self {
        Self {
            status: "UP".to_string(),
        }
    }
}

/// Static service descriptor served at the API root
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponseDto {
    pub status: String,
    pub message: String,
    pub version: String,
    pub author: String,
    pub github: String,
    pub docs: String,
    pub contact: String,
}

impl Default for WelcomeResponseDto {
    fn default() -> Self {
        Self {
            status: "Success".to_string(),
            message: "Welcome to Kazibyte API".to_string(),
            version: API_VERSION.to_string(),
            author: API_AUTHOR.to_string(),
            github: API_GITHUB_URL.to_string(),
            docs: API_DOCS_URL.to_string(),
            contact: API_CONTACT_URL.to_string(),
        }
    }
}
