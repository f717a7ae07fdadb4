//! Configuration constants.
//!
//! This module defines the defaults used by the connector when the caller
//! does not supply explicit options.

use std::time::Duration;

/// Port assumed when the target does not carry an explicit one.
pub const DEFAULT_TLS_PORT: u16 = 443;

/// Default bound on the combined resolve + connect + handshake time.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// DNS resolver tuning
/// Per-query DNS timeout in seconds.
/// Kept short so unresponsive resolvers fail fast; the overall operation
/// timeout still bounds the whole connect.
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// DNS retry attempts per lookup.
pub const DNS_ATTEMPTS: usize = 2;
