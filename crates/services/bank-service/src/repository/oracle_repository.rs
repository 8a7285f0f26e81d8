//! Oracle adapter.
//!
//! PL/SQL blocks are called with named binds. The identifiers produced by
//! `open_account` come back through OUT binds of the same call, so no
//! follow-up read is needed.
//!
//! The `oracle` driver is blocking: every call runs on the blocking thread
//! pool while the async side holds a [`BreakOnDrop`] guard. If the awaiting
//! future is dropped (client gone, request deadline hit) the guard interrupts
//! the server-side call instead of letting it run to completion.

use std::sync::Arc;

use async_trait::async_trait;
use oracle::pool::Pool;
use oracle::sql_type::OracleType;
use oracle::{Connection, Error as OracleError};
use tokio::task::spawn_blocking;
use tracing::{debug, warn};

use domain::{
    Customer, NewCustomer, OpenedAccount, RepositoryError, RepositoryResult, MAX_CUSTOMERS,
};

use super::BankRepository;

const OPEN_ACCOUNT: &str = "BEGIN
    bank_svc.open_account(
        p_name => :name,
        p_email => :email,
        p_initial_balance => :initial_balance,
        p_customer_id => :customer_id,
        p_account_id => :account_id
    );
END;";
const GET_CUSTOMER: &str = "SELECT id, name, email FROM bank_svc.customer WHERE id = :id";
const GET_CUSTOMERS: &str =
    "SELECT id, name, email FROM bank_svc.customer FETCH FIRST :limit ROWS ONLY";
const GET_BALANCE: &str = "SELECT balance FROM bank_svc.account WHERE id = :id";
const MAKE_TRANSFER: &str = "BEGIN
    bank_svc.make_transfer(
        p_from_account_id => :from_account_id,
        p_to_account_id => :to_account_id,
        p_amount => :amount
    );
END;";

/// ORA-01013: user requested cancel of current operation
const ORA_USER_CANCELLED: i32 = 1013;

/// [`BankRepository`] over Oracle.
pub struct OracleBankRepository {
    pool: Arc<Pool>,
}

impl OracleBankRepository {
    /// Create new repository instance
    pub fn new(pool: Pool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Run `call` on a pooled connection off the async runtime.
    async fn run<T, F>(&self, operation: &'static str, call: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        let conn = spawn_blocking(move || pool.get())
            .await
            .map_err(|e| RepositoryError::database(operation, "acquiring connection", e))?
            .map_err(oracle_error(operation, "acquiring connection"))?;

        run_guarded(Arc::new(conn), operation, call).await
    }
}

/// A connection whose running call can be interrupted from another thread.
trait Interrupt: Send + Sync + 'static {
    fn interrupt(&self) -> oracle::Result<()>;
}

impl Interrupt for Connection {
    fn interrupt(&self) -> oracle::Result<()> {
        self.break_execution()
    }
}

/// Run the blocking `call` while the awaiting future holds a [`BreakOnDrop`].
async fn run_guarded<C, T, F>(conn: Arc<C>, operation: &'static str, call: F) -> RepositoryResult<T>
where
    C: Interrupt,
    T: Send + 'static,
    F: FnOnce(&C) -> RepositoryResult<T> + Send + 'static,
{
    let mut guard = BreakOnDrop::new(Arc::clone(&conn), operation);
    let result = spawn_blocking(move || call(&conn)).await;
    guard.disarm();

    result.map_err(|e| RepositoryError::database(operation, "joining worker", e))?
}

/// Interrupts the connection's running call unless disarmed first.
struct BreakOnDrop<C: Interrupt> {
    conn: Arc<C>,
    operation: &'static str,
    armed: bool,
}

impl<C: Interrupt> BreakOnDrop<C> {
    fn new(conn: Arc<C>, operation: &'static str) -> Self {
        Self {
            conn,
            operation,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<C: Interrupt> Drop for BreakOnDrop<C> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!(operation = self.operation, "Caller went away, interrupting database call");
        if let Err(e) = self.conn.interrupt() {
            warn!(operation = self.operation, "Failed to interrupt database call: {}", e);
        }
    }
}

/// Read the ids `open_account` returns through its OUT binds.
fn read_opened_account<R>(read: R) -> RepositoryResult<OpenedAccount>
where
    R: Fn(&str) -> oracle::Result<i64>,
{
    const OP: &str = "open_account";
    let customer_id = read("customer_id").map_err(oracle_error(OP, "retrieving output parameters"))?;
    let account_id = read("account_id").map_err(oracle_error(OP, "retrieving output parameters"))?;
    Ok(OpenedAccount {
        customer_id,
        account_id,
    })
}

/// Translate a driver error raised during `step` of `operation`.
fn oracle_error(
    operation: &'static str,
    step: &'static str,
) -> impl FnOnce(OracleError) -> RepositoryError {
    move |err| match err {
        OracleError::NoDataFound => RepositoryError::not_found(operation),
        e @ (OracleError::NullValue | OracleError::InvalidTypeConversion(..)) => {
            RepositoryError::scan(operation, e)
        }
        OracleError::OciError(ref db) if db.code() == ORA_USER_CANCELLED => {
            RepositoryError::Cancelled { operation }
        }
        other => RepositoryError::database(operation, step, other),
    }
}

#[async_trait]
impl BankRepository for OracleBankRepository {
    async fn open_account(
        &self,
        customer: &NewCustomer,
        initial_balance: f64,
    ) -> RepositoryResult<OpenedAccount> {
        const OP: &str = "open_account";
        let customer = customer.clone();

        self.run(OP, move |conn| {
            debug!(statement = OPEN_ACCOUNT, "Calling procedure");
            let mut stmt = conn
                .statement(OPEN_ACCOUNT)
                .build()
                .map_err(oracle_error(OP, "preparing call"))?;
            stmt.execute_named(&[
                ("name", &customer.name),
                ("email", &customer.email),
                ("initial_balance", &initial_balance),
                ("customer_id", &OracleType::Int64),
                ("account_id", &OracleType::Int64),
            ])
            .map_err(oracle_error(OP, "calling procedure"))?;

            let opened = read_opened_account(|name| stmt.bind_value(name))?;
            conn.commit().map_err(oracle_error(OP, "committing"))?;
            Ok(opened)
        })
        .await
    }

    async fn get_balance(&self, account_id: i64) -> RepositoryResult<f64> {
        const OP: &str = "get_balance";

        self.run(OP, move |conn| {
            conn.query_row_as::<f64>(GET_BALANCE, &[&account_id])
                .map_err(oracle_error(OP, "performing query"))
        })
        .await
    }

    async fn make_transfer(
        &self,
        account_id: i64,
        to_account_id: i64,
        amount: f64,
    ) -> RepositoryResult<()> {
        const OP: &str = "make_transfer";

        self.run(OP, move |conn| {
            debug!(statement = MAKE_TRANSFER, "Calling procedure");
            let mut stmt = conn
                .statement(MAKE_TRANSFER)
                .build()
                .map_err(oracle_error(OP, "preparing call"))?;
            stmt.execute_named(&[
                ("from_account_id", &account_id),
                ("to_account_id", &to_account_id),
                ("amount", &amount),
            ])
            .map_err(oracle_error(OP, "calling procedure"))?;

            conn.commit().map_err(oracle_error(OP, "committing"))
        })
        .await
    }

    async fn get_customer(&self, customer_id: i64) -> RepositoryResult<Customer> {
        const OP: &str = "get_customer";

        self.run(OP, move |conn| {
            let (id, name, email) = conn
                .query_row_as::<(i64, String, String)>(GET_CUSTOMER, &[&customer_id])
                .map_err(oracle_error(OP, "performing query"))?;
            Ok(Customer { id, name, email })
        })
        .await
    }

    async fn get_customers(&self) -> RepositoryResult<Vec<Customer>> {
        const OP: &str = "get_customers";

        self.run(OP, move |conn| {
            let limit = MAX_CUSTOMERS as i64;
            let rows = conn
                .query_as::<(i64, String, String)>(GET_CUSTOMERS, &[&limit])
                .map_err(oracle_error(OP, "performing query"))?;

            rows.map(|row| {
                row.map(|(id, name, email)| Customer { id, name, email })
                    .map_err(oracle_error(OP, "iterating rows"))
            })
            .collect::<RepositoryResult<Vec<_>>>()
        })
        .await
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.run("ping", |conn| {
            conn.ping().map_err(oracle_error("ping", "pinging"))
        })
        .await
    }
}
