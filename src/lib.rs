//! cert_status library: TLS certificate chain inspection
//!
//! This library connects to a remote host, captures the certificate chain the
//! server presents during the TLS handshake, and reports structured facts
//! about it: whether the leaf certificate is expired, and a normalized
//! description of every certificate in the chain (subject name, expiration
//! timestamp, certificate-authority flag).
//!
//! The handshake is configured to skip certificate-trust validation so that
//! untrusted, self-signed, or already-expired chains remain inspectable. The
//! library never validates the chain against a trust anchor and never checks
//! revocation; it only reports what the server presents and its stated
//! validity window.
//!
//! # Example
//!
//! ```no_run
//! use cert_status::{chain, is_expired};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let expired = is_expired("github.com").await?;
//! println!("leaf expired: {expired}");
//!
//! for record in chain("github.com").await? {
//!     println!("{} expires={} isca={}", record.subject, record.expires, record.isca);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod analyzer;
pub mod config;
mod connector;
mod error_handling;
mod models;
mod target;

// Re-export public API
pub use analyzer::{is_leaf_expired, leaf_expired_at, parse_chain};
pub use config::Config;
pub use connector::fetch_chain;
pub use error_handling::InspectError;
pub use inspect::{chain, chain_with, is_expired, is_expired_with};
pub use models::CertificateRecord;
pub use target::Target;

// Internal inspect module (composes the connector and the analyzer)
mod inspect {
    use log::debug;

    use crate::analyzer::{is_leaf_expired, parse_chain};
    use crate::config::Config;
    use crate::connector::fetch_chain;
    use crate::error_handling::InspectError;
    use crate::models::CertificateRecord;
    use crate::target::Target;

    /// Reports whether the leaf certificate presented by `host` is expired.
    ///
    /// `host` is a bare hostname or `host:port`; the port defaults to 443.
    /// Uses the default configuration (10-second connect bound).
    ///
    /// # Errors
    ///
    /// Returns an [`InspectError`] if the target cannot be parsed, the chain
    /// cannot be fetched, or the presented certificates cannot be decoded.
    pub async fn is_expired(host: &str) -> Result<bool, InspectError> {
        is_expired_with(host, &Config::default()).await
    }

    /// [`is_expired`] with explicit configuration.
    ///
    /// # Errors
    ///
    /// Same as [`is_expired`].
    pub async fn is_expired_with(host: &str, config: &Config) -> Result<bool, InspectError> {
        let target: Target = host.parse()?;
        debug!("Checking leaf expiration for {target}");
        let raw = fetch_chain(&target, config.timeout).await?;
        let records = parse_chain(&raw)?;
        is_leaf_expired(&records)
    }

    /// Returns one normalized record per certificate presented by `host`,
    /// leaf first, in presentation order.
    ///
    /// `host` is a bare hostname or `host:port`; the port defaults to 443.
    /// Uses the default configuration (10-second connect bound).
    ///
    /// # Errors
    ///
    /// Returns an [`InspectError`] if the target cannot be parsed, the chain
    /// cannot be fetched, or any presented certificate cannot be decoded.
    /// The result is never a truncated chain.
    pub async fn chain(host: &str) -> Result<Vec<CertificateRecord>, InspectError> {
        chain_with(host, &Config::default()).await
    }

    /// [`chain`] with explicit configuration.
    ///
    /// # Errors
    ///
    /// Same as [`chain`].
    pub async fn chain_with(
        host: &str,
        config: &Config,
    ) -> Result<Vec<CertificateRecord>, InspectError> {
        let target: Target = host.parse()?;
        debug!("Inspecting certificate chain for {target}");
        let raw = fetch_chain(&target, config.timeout).await?;
        parse_chain(&raw)
    }
}
