//! Banking HTTP API Library
//!
//! This crate exposes the banking repository over a small JSON API under
//! `/api`, plus a health check and the OpenAPI document.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::sync::Arc;

use tracing::info;

use bank_service_lib::repository::BankRepository;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Serve the API until Ctrl-C is received.
pub async fn run_server(
    config: GatewayConfig,
    repo: Arc<dyn BankRepository>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.addr.clone();
    let app = create_router(AppState::new(repo, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
