//! Library configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default port, timeouts, resolver tuning)
//! - The runtime [`Config`] options accepted by the top-level operations

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::Config;
