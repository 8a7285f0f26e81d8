//! Request logging middleware.

use std::time::Instant;

use axum::{
    body::Body,
    extract::OriginalUri,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Log the route, resulting status and elapsed time of every request.
///
/// The handler runs inside a span carrying a generated request id, so
/// errors logged further down are attributed to their request.
pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    // Nested routers see the path with their prefix stripped.
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let request_id = Uuid::new_v4();

    let span = info_span!("request", %request_id, %method, %path);
    let start = Instant::now();

    span.in_scope(|| info!("started"));
    let response = next.run(request).instrument(span.clone()).await;

    span.in_scope(|| {
        info!(
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "finished"
        );
    });

    response
}
