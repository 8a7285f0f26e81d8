//! HTTP handlers.

pub mod account_handler;
pub mod customer_handler;
pub mod health_handler;

pub use account_handler::account_routes;
pub use customer_handler::customer_routes;
pub use health_handler::health_routes;
