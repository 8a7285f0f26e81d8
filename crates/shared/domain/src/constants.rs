//! Domain-level constants.

// =============================================================================
// Listing
// =============================================================================

/// Maximum number of customers returned by a single listing call
pub const MAX_CUSTOMERS: usize = 100;

// =============================================================================
// HTTP
// =============================================================================

/// Common prefix of every banking route
pub const API_PREFIX: &str = "/api";

/// Plain-text body returned by a successful transfer
pub const TRANSFER_OK: &str = "ok";

// =============================================================================
// Bootstrap
// =============================================================================

/// Default upper bound for the startup liveness ping, in seconds
pub const DEFAULT_PING_TIMEOUT_SECONDS: u64 = 10;

/// Default upper bound for a single HTTP request, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
