//! JSON body extractors.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use common::AppError;
use domain::DomainError;

/// JSON extractor that decodes the body whatever its `Content-Type`.
///
/// Bodies that do not decode are validation errors (422). Failing to read
/// the body keeps the status axum assigns (e.g. 413 past the body limit).
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::with_status(e.status(), e.body_text()))?;

        let value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::validation(format!("invalid JSON body: {}", e)))?;

        Ok(JsonBody(value))
    }
}

/// JSON extractor that also runs the payload's validation rules.
///
/// Rule violations are rejected as bad requests (400) before the handler
/// runs.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        value.validate().map_err(DomainError::from)?;

        Ok(ValidatedJson(value))
    }
}
