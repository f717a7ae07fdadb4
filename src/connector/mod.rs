//! TLS connection establishment and chain capture.
//!
//! This module opens a TLS session to a target and captures the certificate
//! chain the server presents during the handshake:
//! - Hostname resolution via `hickory-resolver` (skipped for IP literals)
//! - TCP connect and TLS handshake over `tokio-rustls`
//! - Certificate-trust validation disabled, so untrusted, self-signed, or
//!   expired chains remain inspectable
//!
//! The captured chain is raw DER, leaf first, exactly as presented by the
//! peer; decoding it is the analyzer's concern. One connection is opened and
//! closed per call, with no state kept across calls.

mod resolver;
mod verifier;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rustls::pki_types::{CertificateDer, ServerName};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_rustls::rustls::ClientConfig;
use tokio_rustls::TlsConnector;

use crate::error_handling::InspectError;
use crate::target::Target;

use resolver::resolve_host_to_ip;
use verifier::AcceptAnyServerCert;

/// Connects to `target` and captures the certificate chain presented during
/// the TLS handshake, leaf first, in presentation order.
///
/// The handshake is configured to skip certificate-trust validation so that
/// a chain that would fail verification can still be inspected. `timeout`
/// bounds the combined resolve + connect + handshake time. A single attempt
/// is made per call, and the connection is closed on every exit path.
///
/// # Errors
///
/// Returns [`InspectError::ResolutionError`] when the hostname cannot be
/// resolved, [`InspectError::ConnectionError`] when the TCP connection
/// fails, [`InspectError::HandshakeError`] when the TLS negotiation fails,
/// [`InspectError::TimeoutError`] when `timeout` elapses first,
/// [`InspectError::EmptyChainError`] when the peer presents no certificates,
/// and [`InspectError::InvalidTargetError`] when the host cannot be used as
/// a TLS server name.
pub async fn fetch_chain(
    target: &Target,
    timeout: Duration,
) -> Result<Vec<CertificateDer<'static>>, InspectError> {
    match tokio::time::timeout(timeout, connect_and_capture(target)).await {
        Ok(result) => result,
        Err(_) => {
            debug!(
                "TLS connection to {target} timed out after {}s",
                timeout.as_secs()
            );
            Err(InspectError::TimeoutError(timeout))
        }
    }
}

/// One resolve + connect + handshake attempt.
///
/// The caller owns the timeout envelope; dropping this future on expiry
/// drops the socket with it, so the transport never outlives the call.
async fn connect_and_capture(
    target: &Target,
) -> Result<Vec<CertificateDer<'static>>, InspectError> {
    let server_name = ServerName::try_from(target.host.clone()).map_err(|e| {
        InspectError::InvalidTargetError(format!("invalid server name {:?}: {e}", target.host))
    })?;

    let addr = resolve_target(target).await?;

    debug!("Connecting to {target} at {addr}");
    let sock = TcpStream::connect(addr)
        .await
        .map_err(InspectError::ConnectionError)?;

    let connector = TlsConnector::from(Arc::new(inspection_client_config()));
    let mut tls_stream = connector
        .connect(server_name, sock)
        .await
        .map_err(InspectError::HandshakeError)?;

    let (_, session) = tls_stream.get_ref();
    let chain: Vec<CertificateDer<'static>> = session
        .peer_certificates()
        .unwrap_or_default()
        .iter()
        .map(|cert| cert.clone().into_owned())
        .collect();

    // Send close_notify; the socket is dropped regardless of the outcome.
    let _ = tls_stream.shutdown().await;

    if chain.is_empty() {
        return Err(InspectError::EmptyChainError);
    }
    debug!("Captured {} certificate(s) from {target}", chain.len());
    Ok(chain)
}

/// Resolves the target to a socket address, skipping DNS for IP literals.
async fn resolve_target(target: &Target) -> Result<SocketAddr, InspectError> {
    let ip = match target.host.parse::<IpAddr>() {
        Ok(ip) => ip,
        Err(_) => resolve_host_to_ip(&target.host).await?,
    };
    Ok(SocketAddr::new(ip, target.port))
}

/// Builds the client configuration scoped to chain inspection.
///
/// The handshake completes against any presented chain so the certificates
/// can be read. Never reuse this configuration for a connection whose
/// payload is trusted or consumed for other purposes.
fn inspection_client_config() -> ClientConfig {
    ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert))
        .with_no_client_auth()
}
