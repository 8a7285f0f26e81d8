//! Bank Service Library
//!
//! This crate provides the banking repository contract and one adapter per
//! supported database dialect. The adapter is chosen once at startup and
//! shared, read-only, by every request.

pub mod dialect;
pub mod infra;
pub mod repository;

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectionTrait, DatabaseConnection};
use thiserror::Error;
use tracing::info;

use common::DatabaseConfig;
use domain::RepositoryError;

pub use crate::dialect::Dialect;
use crate::infra::{Database, OracleUrl};
use crate::repository::{
    BankRepository, MySqlBankRepository, OracleBankRepository, PostgresBankRepository,
};

/// Errors raised while bringing the database side up.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("opening database connection: {0}")]
    Open(String),

    #[error("invalid connection string: {0}")]
    InvalidUrl(String),

    #[error("pinging database: {0}")]
    Ping(#[from] RepositoryError),

    #[error("pinging database: no answer within {0:?}")]
    PingTimeout(Duration),
}

/// Build the connection pool and the adapter for `dialect`.
pub async fn connect(
    dialect: Dialect,
    config: &DatabaseConfig,
) -> Result<Arc<dyn BankRepository>, ConnectError> {
    let repo: Arc<dyn BankRepository> = match dialect {
        Dialect::MySql => {
            let connection = open_sea_orm(dialect, config).await?;
            Arc::new(MySqlBankRepository::new(connection))
        }
        Dialect::Postgres => {
            let connection = open_sea_orm(dialect, config).await?;
            Arc::new(PostgresBankRepository::new(connection))
        }
        Dialect::Oracle => {
            let url: OracleUrl = config.url.parse().map_err(ConnectError::InvalidUrl)?;
            let pool = infra::connect_oracle(url, config.clone())
                .await
                .map_err(|e| ConnectError::Open(e.to_string()))?;
            Arc::new(OracleBankRepository::new(pool))
        }
    };

    info!(dialect = %dialect, "Database connection opened");
    Ok(repo)
}

async fn open_sea_orm(
    dialect: Dialect,
    config: &DatabaseConfig,
) -> Result<DatabaseConnection, ConnectError> {
    let connection = Database::connect(config)
        .await
        .map_err(|e| ConnectError::Open(e.to_string()))?
        .get_connection();
    ensure_backend(dialect, &connection)?;
    Ok(connection)
}

/// Reject a connection whose backend, taken from the url scheme, is not the
/// one `dialect` issues statements for.
fn ensure_backend(dialect: Dialect, connection: &DatabaseConnection) -> Result<(), ConnectError> {
    let actual = connection.get_database_backend();
    match dialect.sea_orm_backend() {
        Some(expected) if expected != actual => Err(ConnectError::InvalidUrl(format!(
            "driver {} cannot use a {:?} connection string",
            dialect, actual
        ))),
        _ => Ok(()),
    }
}

/// Ping the repository, failing if it does not answer within `timeout`.
pub async fn ping_with_timeout(
    repo: &dyn BankRepository,
    timeout: Duration,
) -> Result<(), ConnectError> {
    match tokio::time::timeout(timeout, repo.ping()).await {
        Ok(result) => result.map_err(ConnectError::from),
        Err(_) => Err(ConnectError::PingTimeout(timeout)),
    }
}
