//! MySQL adapter.
//!
//! Procedures are called with positional `?` placeholders. Their outputs land
//! in session variables (`@customer_id`, `@account_id`) that a second
//! statement reads back.

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement, TransactionTrait,
    Value,
};
use tracing::debug;

use domain::{
    Customer, NewCustomer, OpenedAccount, RepositoryError, RepositoryResult, MAX_CUSTOMERS,
};

use super::rows::{db_error, BalanceRow, CustomerRow, OpenedAccountRow};
use super::BankRepository;

const OPEN_ACCOUNT: &str = "CALL open_account(?, ?, ?, @customer_id, @account_id)";
const READ_OPEN_ACCOUNT_OUTPUT: &str =
    "SELECT @customer_id AS customer_id, @account_id AS account_id";
const GET_CUSTOMER: &str = "SELECT id, name, email FROM customer WHERE id = ?";
const GET_CUSTOMERS: &str = "SELECT id, name, email FROM customer LIMIT ?";
const GET_BALANCE: &str = "SELECT CAST(balance AS DOUBLE) AS balance FROM account WHERE id = ?";
const MAKE_TRANSFER: &str = "CALL make_transfer(?, ?, ?)";

/// [`BankRepository`] over MySQL-compatible servers.
pub struct MySqlBankRepository {
    db: DatabaseConnection,
}

impl MySqlBankRepository {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn statement<I>(sql: &str, values: I) -> Statement
where
    I: IntoIterator<Item = Value>,
{
    Statement::from_sql_and_values(DbBackend::MySql, sql, values)
}

#[async_trait]
impl BankRepository for MySqlBankRepository {
    async fn open_account(
        &self,
        customer: &NewCustomer,
        initial_balance: f64,
    ) -> RepositoryResult<OpenedAccount> {
        const OP: &str = "open_account";

        // Session variables are connection-scoped: the CALL and the read-back
        // must run on one pooled connection, which the transaction pins.
        let session = self
            .db
            .begin()
            .await
            .map_err(db_error(OP, "acquiring session"))?;

        debug!(statement = OPEN_ACCOUNT, "Calling procedure");
        session
            .execute(statement(
                OPEN_ACCOUNT,
                [
                    customer.name.clone().into(),
                    customer.email.clone().into(),
                    initial_balance.into(),
                ],
            ))
            .await
            .map_err(db_error(OP, "calling procedure"))?;

        let row = OpenedAccountRow::find_by_statement(Statement::from_string(
            DbBackend::MySql,
            READ_OPEN_ACCOUNT_OUTPUT,
        ))
        .one(&session)
        .await
        .map_err(db_error(OP, "retrieving output parameters"))?
        .ok_or_else(|| RepositoryError::scan(OP, "procedure produced no output row"))?;

        session
            .commit()
            .await
            .map_err(db_error(OP, "releasing session"))?;

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
