//! Gateway configuration.

use common::ServiceConfig;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on
    pub addr: String,
    /// Shared service settings (request timeout)
    pub service: ServiceConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables for the given listen address.
    pub fn from_env(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            service: ServiceConfig::from_env(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            addr: "localhost:3000".to_string(),
            service: ServiceConfig::default(),
        }
    }
}
