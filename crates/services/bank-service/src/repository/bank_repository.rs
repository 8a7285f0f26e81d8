//! Backend-agnostic banking contract.

use async_trait::async_trait;

use domain::{Customer, NewCustomer, OpenedAccount, RepositoryResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Banking operations every dialect adapter implements.
///
/// Account creation, balance mutation and transfer atomicity live in the
/// database's stored procedures; an adapter only invokes them. Each call is
/// a single attempt: failures are returned as-is, never retried.
///
/// Dropping a returned future aborts the in-flight database call.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BankRepository: Send + Sync {
    /// Create a customer and its linked account, returning both identifiers
    async fn open_account(
        &self,
        customer: &NewCustomer,
        initial_balance: f64,
    ) -> RepositoryResult<OpenedAccount>;

    /// Current balance of an account, read fresh from the database
    async fn get_balance(&self, account_id: i64) -> RepositoryResult<f64>;

    /// Move `amount` between two accounts
    async fn make_transfer(
        &self,
        account_id: i64,
        to_account_id: i64,
        amount: f64,
    ) -> RepositoryResult<()>;

    /// Find a customer by id; `NotFound` when no row matches
    async fn get_customer(&self, customer_id: i64) -> RepositoryResult<Customer>;

    /// Up to `MAX_CUSTOMERS` customers in backend order
    async fn get_customers(&self) -> RepositoryResult<Vec<Customer>>;

    /// Check database connectivity
    async fn ping(&self) -> RepositoryResult<()>;
}
