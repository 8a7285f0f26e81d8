//! Postgres adapter.
//!
//! `open_account` is a set-returning function, so calling it and reading its
//! output is one query. `make_transfer` is a procedure with no result row.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement, Value};
use tracing::debug;

use domain::{
    Customer, NewCustomer, OpenedAccount, RepositoryError, RepositoryResult, MAX_CUSTOMERS,
};

use super::rows::{db_error, BalanceRow, CustomerRow, OpenedAccountRow};
use super::BankRepository;

// The column list after the alias names the function's output positionally.
const OPEN_ACCOUNT: &str = "SELECT r.customer_id::INT8 AS customer_id, r.account_id::INT8 AS account_id \
     FROM bank_svc.open_account($1, $2, $3::NUMERIC) AS r(customer_id, account_id)";
const GET_CUSTOMER: &str =
    "SELECT id::INT8 AS id, name, email FROM bank_svc.customer WHERE id = $1";
const GET_CUSTOMERS: &str =
    "SELECT id::INT8 AS id, name, email FROM bank_svc.customer LIMIT $1";
const GET_BALANCE: &str =
    "SELECT balance::FLOAT8 AS balance FROM bank_svc.account WHERE id = $1";
const MAKE_TRANSFER: &str = "CALL bank_svc.make_transfer($1, $2, $3::NUMERIC)";

/// [`BankRepository`] over Postgres-compatible servers.
pub struct PostgresBankRepository {
    db: DatabaseConnection,
}

impl PostgresBankRepository {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn statement<I>(sql: &str, values: I) -> Statement
where
    I: IntoIterator<Item = Value>,
{
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

#[async_trait]
impl BankRepository for PostgresBankRepository {
    async fn open_account(
        &self,
        customer: &NewCustomer,
        initial_balance: f64,
    ) -> RepositoryResult<OpenedAccount> {
        const OP: &str = "open_account";

        debug!(statement = OPEN_ACCOUNT, "Calling function");
        let row = OpenedAccountRow::find_by_statement(statement(
            OPEN_ACCOUNT,
            [
                customer.name.clone().into(),
                customer.email.clone().into(),
                initial_balance.into(),
            ],
        ))
        .one(&self.db)
        .await
        .map_err(db_error(OP, "calling function"))?
        .ok_or_else(|| RepositoryError::scan(OP, "function returned no row"))?;

        Ok(row.into())
    }

    async fn get_balance(&self, account_id: i64) -> RepositoryResult<f64> {
        const OP: &str = "get_balance";

        let row = BalanceRow::find_by_statement(statement(GET_BALANCE, [account_id.into()]))
            .one(&self.db)
            .await
            .map_err(db_error(OP, "performing query"))?
            .ok_or(RepositoryError::not_found(OP))?;

        Ok(row.balance)
    }

    async fn make_transfer(
        &self,
        account_id: i64,
        to_account_id: i64,
        amount: f64,
    ) -> RepositoryResult<()> {
        debug!(statement = MAKE_TRANSFER, "Calling procedure");
        self.db
            .execute(statement(
                MAKE_TRANSFER,
                [account_id.into(), to_account_id.into(), amount.into()],
            ))
            .await
            .map_err(db_error("make_transfer", "calling procedure"))?;

        Ok(())
    }

    async fn get_customer(&self, customer_id: i64) -> RepositoryResult<Customer> {
        const OP: &str = "get_customer";

        let row = CustomerRow::find_by_statement(statement(GET_CUSTOMER, [customer_id.into()]))
            .one(&self.db)
            .await
            .map_err(db_error(OP, "performing query"))?
            .ok_or(RepositoryError::not_found(OP))?;

        Ok(row.into())
    }

    async fn get_customers(&self) -> RepositoryResult<Vec<Customer>> {
        let rows = CustomerRow::find_by_statement(statement(
            GET_CUSTOMERS,
            [(MAX_CUSTOMERS as i64).into()],
        ))
        .all(&self.db)
        .await
        .map_err(db_error("get_customers", "performing query"))?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.db.ping().await.map_err(db_error("ping", "pinging"))
    }
}
