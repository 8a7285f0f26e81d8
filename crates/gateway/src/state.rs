//! Application state for dependency injection.

use std::sync::Arc;

use bank_service_lib::repository::BankRepository;

use crate::config::GatewayConfig;

/// Application state shared across handlers.
///
/// The repository is chosen once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn BankRepository>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(repo: Arc<dyn BankRepository>, config: GatewayConfig) -> Self {
        Self { repo, config }
    }
}
