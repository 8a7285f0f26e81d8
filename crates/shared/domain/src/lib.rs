//! Domain layer - Core banking value types.
//!
//! This crate contains pure domain types with no infrastructure dependencies.
//! All types here are shared by the repository adapters and the HTTP gateway.

pub mod account;
pub mod constants;
pub mod customer;
pub mod error;

pub use account::{Balance, Transfer};
pub use constants::*;
pub use customer::{Customer, NewCustomer, OpenAccount, OpenedAccount};
pub use error::{DomainError, RepositoryError, RepositoryResult};
