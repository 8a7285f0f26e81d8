//! Customer value types.

use serde::{Deserialize, Serialize};

/// Customer as stored by the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Customer {
    /// Database-assigned identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address (uniqueness is enforced by the database)
    pub email: String,
}

/// Customer payload submitted when opening an account.
///
/// Any `id` sent by the client is ignored; identifiers are always assigned
/// by the database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct NewCustomer {
    #[cfg_attr(feature = "openapi", schema(example = "Ana"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "ana@x.com"))]
    pub email: String,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Request to open a customer together with its first account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OpenAccount {
    pub customer: NewCustomer,
    #[cfg_attr(feature = "openapi", schema(example = 100.0))]
    #[serde(default)]
    pub initial_balance: f64,
}

/// Identifiers produced by opening an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OpenedAccount {
    pub customer_id: i64,
    pub account_id: i64,
}
