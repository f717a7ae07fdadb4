//! Runtime options for the top-level operations.

use std::time::Duration;

use crate::config::DEFAULT_TIMEOUT;

/// Options accepted by [`chain_with`](crate::chain_with) and
/// [`is_expired_with`](crate::is_expired_with).
///
/// The default configuration bounds each connect at 10 seconds, matching
/// [`DEFAULT_TIMEOUT`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Bound on the combined resolve + connect + handshake time for one call.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout_is_ten_seconds() {
        assert_eq!(Config::default().timeout, Duration::from_secs(10));
    }
}
