use axum::{
    body::Body,
    extract::{FromRequest, Multipart, Request},
};

use crate::core::error::AppError;

/// Multipart extractor that reports non-multipart requests the way the
/// upload endpoint expects: as a request that carries no file.
pub struct AppMultipart(pub Multipart);

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Multipart::from_request(req, state).await {
            Ok(multipart) => Ok(Self(multipart)),
            Err(rejection) => {
                tracing::debug!("Request is not multipart: {}", rejection);
                Err(AppError::BadRequest("File not found".to_string()))
            }
        }
    }
}
