//! Infrastructure layer - connection pools for each backend.

mod db;
mod oracle_pool;

pub use db::Database;
pub use oracle_pool::{connect_oracle, OracleUrl};
