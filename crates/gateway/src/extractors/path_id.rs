//! Numeric path identifier extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use common::{AppError, AppResult};

/// The `:id` path segment parsed as a signed 64-bit integer.
///
/// Anything that is not a base-10 integer is rejected with 422 before the
/// handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        parse_id(&raw).map(PathId)
    }
}

/// Parse a path identifier, mapping failures to a validation error.
pub fn parse_id(raw: &str) -> AppResult<i64> {
    if raw.is_empty() {
        return Err(AppError::validation("missing id"));
    }
    raw.parse::<i64>()
        .map_err(|e| AppError::validation(format!("invalid id {:?}: {}", raw, e)))
}
