//! Account and transfer value types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Balance of a single account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Balance {
    pub balance: f64,
}

/// Funds transfer request. Not persisted by this layer.
///
/// Missing fields decode as zero, so an omitted amount is caught by
/// validation rather than by the JSON decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct Transfer {
    /// Source account
    pub account_id: i64,
    /// Destination account
    pub to_account_id: i64,
    /// Amount to move; must be strictly positive
    #[validate(range(exclusive_min = 0.0, message = "transfer amount must be greater than zero"))]
    #[cfg_attr(feature = "openapi", schema(example = 25.5))]
    pub amount: f64,
}
