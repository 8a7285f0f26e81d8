//! Supported database dialects.

use std::fmt;
use std::str::FromStr;

use sea_orm::DbBackend;
use thiserror::Error;

/// Procedural-call convention of the configured backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Positional placeholders, results read back from session variables
    MySql,
    /// Named binds with explicit OUT parameters
    Oracle,
    /// Functions whose result is read like a query row
    Postgres,
}

impl Dialect {
    /// The sea-orm backend this dialect's adapter speaks, if it runs on sea-orm.
    pub fn sea_orm_backend(self) -> Option<DbBackend> {
        match self {
            Dialect::MySql => Some(DbBackend::MySql),
            Dialect::Postgres => Some(DbBackend::Postgres),
            Dialect::Oracle => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown driver {0:?} (expected one of: mysql, oracle, pgx)")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "oracle" => Ok(Dialect::Oracle),
            "pgx" | "postgres" | "postgresql" => Ok(Dialect::Postgres),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::MySql => write!(f, "mysql"),
            Dialect::Oracle => write!(f, "oracle"),
            Dialect::Postgres => write!(f, "pgx"),
        }
    }
}
