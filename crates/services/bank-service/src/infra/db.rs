//! sea-orm connection for the MySQL and Postgres backends.

use sea_orm::{ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr};

use common::DatabaseConfig;

/// Database wrapper for connection management
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a pooled connection. The backend is chosen by the url scheme
    /// (`mysql://` or `postgres://`).
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout())
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        tracing::debug!(backend = ?connection.get_database_backend(), "Connection pool ready");

        Ok(Self { connection })
    }

    /// Hand the pooled connection over to its adapter.
    pub fn get_connection(self) -> DatabaseConnection {
        self.connection
    }
}
