//! Panic recovery.

use std::any::Any;

use axum::response::{IntoResponse, Response};

use common::AppError;

/// Render a panicking handler as an untagged failure (500).
///
/// The panic payload is logged and kept out of the response body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::internal(format!("handler panicked: {}", detail)).into_response()
}
