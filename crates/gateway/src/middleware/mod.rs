//! Middleware wrapped around the banking handlers.

mod logger;
mod recover;

pub use logger::log_request;
pub use recover::handle_panic;
