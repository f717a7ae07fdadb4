//! Error type definitions.
//!
//! One error kind per failure class, split between the transport layer
//! (resolution, connection, handshake, timeout) and the parsing layer
//! (malformed certificate, empty chain). Every kind is terminal for the call
//! that raised it: no retries, no partial results, no silent defaulting.

use std::time::Duration;

use thiserror::Error;

/// Error taxonomy for certificate chain inspection.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InspectError {
    /// The target string could not be parsed into a host and port.
    #[error("Invalid target: {0}")]
    InvalidTargetError(String),

    /// The hostname could not be resolved.
    #[error("DNS resolution error: {0}")]
    ResolutionError(String),

    /// The transport connection could not be established or was reset.
    #[error("Connection error: {0}")]
    ConnectionError(#[source] std::io::Error),

    /// The TLS protocol negotiation itself failed.
    ///
    /// Trust failures are never raised here: the handshake is configured to
    /// accept any presented chain so that it stays inspectable.
    #[error("TLS handshake error: {0}")]
    HandshakeError(#[source] std::io::Error),

    /// The combined resolve + connect + handshake exceeded its bound.
    #[error("TLS connection timed out after {}s", .0.as_secs())]
    TimeoutError(Duration),

    /// A presented blob could not be decoded as an X.509 certificate.
    #[error("Malformed certificate: {0}")]
    MalformedCertificateError(String),

    /// The peer presented no certificates, or an empty record list was given
    /// where a leaf is required.
    #[error("Certificate chain is empty")]
    EmptyChainError,
}

impl InspectError {
    /// Returns a stable short identifier for the error kind.
    ///
    /// The embedding host can switch on this instead of matching display
    /// text when translating failures into its own convention.
    pub fn kind(&self) -> &'static str {
        match self {
            InspectError::InvalidTargetError(_) => "invalid_target",
            InspectError::ResolutionError(_) => "resolution",
            InspectError::ConnectionError(_) => "connection",
            InspectError::HandshakeError(_) => "handshake",
            InspectError::TimeoutError(_) => "timeout",
            InspectError::MalformedCertificateError(_) => "malformed_certificate",
            InspectError::EmptyChainError => "empty_chain",
        }
    }
}
