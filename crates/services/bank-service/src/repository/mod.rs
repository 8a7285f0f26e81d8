//! Repository layer: the banking contract and its dialect adapters.

mod bank_repository;
mod mysql_repository;
mod oracle_repository;
mod postgres_repository;
mod rows;

pub use bank_repository::BankRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use bank_repository::MockBankRepository;
pub use mysql_repository::MySqlBankRepository;
pub use oracle_repository::OracleBankRepository;
pub use postgres_repository::PostgresBankRepository;
