//! Hostname resolution.
//!
//! Builds a resolver with short per-query timeouts so unresponsive DNS
//! servers fail fast; the connector's overall timeout still bounds the
//! whole operation.

use std::net::IpAddr;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS};
use crate::error_handling::InspectError;

/// Resolves a hostname to its first IP address.
///
/// # Errors
///
/// Returns [`InspectError::ResolutionError`] if the lookup fails or yields
/// no addresses.
pub(crate) async fn resolve_host_to_ip(host: &str) -> Result<IpAddr, InspectError> {
    let resolver = build_resolver();
    let response = resolver
        .lookup_ip(host)
        .await
        .map_err(|e| InspectError::ResolutionError(format!("lookup for {host} failed: {e}")))?;
    response
        .iter()
        .next()
        .ok_or_else(|| InspectError::ResolutionError(format!("no IP addresses found for {host}")))
}

/// Default upstream configuration with aggressive timeouts.
fn build_resolver() -> TokioAsyncResolver {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = DNS_ATTEMPTS; // fail faster on unresponsive servers
    opts.ndots = 0; // never append search domains
    TokioAsyncResolver::tokio(ResolverConfig::default(), opts)
}
