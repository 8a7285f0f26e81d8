//! Row shapes and error translation shared by the sea-orm adapters.

use sea_orm::{DbErr, FromQueryResult};

use domain::{Customer, OpenedAccount, RepositoryError};

#[derive(Debug, FromQueryResult)]
pub(crate) struct CustomerRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub(crate) struct BalanceRow {
    pub balance: f64,
}

#[derive(Debug, FromQueryResult)]
pub(crate) struct OpenedAccountRow {
    pub customer_id: i64,
    pub account_id: i64,
}

impl From<OpenedAccountRow> for OpenedAccount {
    fn from(row: OpenedAccountRow) -> Self {
        OpenedAccount {
            customer_id: row.customer_id,
            account_id: row.account_id,
        }
    }
}

/// Translate a sea-orm error raised during `step` of `operation`.
pub(crate) fn db_error(
    operation: &'static str,
    step: &'static str,
) -> impl FnOnce(DbErr) -> RepositoryError {
    move |err| match err {
        DbErr::RecordNotFound(_) => RepositoryError::not_found(operation),
        DbErr::Type(msg) => RepositoryError::scan(operation, msg),
        e @ DbErr::TryIntoErr { .. } => RepositoryError::scan(operation, e),
        other => RepositoryError::database(operation, step, other),
    }
}
