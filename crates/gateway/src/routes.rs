//! Route configuration.

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer};

use domain::API_PREFIX;

use crate::handlers::{account_routes, customer_routes, health_routes};
use crate::middleware::{handle_panic, log_request};
use crate::openapi::openapi_json;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let request_timeout = state.config.service.request_timeout();

    Router::new()
        // Health check (outside the banking middleware)
        .nest("/health", health_routes())
        // OpenAPI document
        .route("/api-docs/openapi.json", get(openapi_json))
        // Banking routes. Layers run in the order listed: the logger sees
        // the final status, including the 408 produced when the timeout
        // drops an unfinished handler and the 500 rendered for a panic.
        .nest(
            API_PREFIX,
            api_routes().route_layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(log_request))
                    .layer(TimeoutLayer::new(request_timeout))
                    .layer(CatchPanicLayer::custom(handle_panic)),
            ),
        )
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/customers", customer_routes())
        .nest("/accounts", account_routes())
}
