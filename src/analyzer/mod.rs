//! Certificate chain analysis.
//!
//! This module converts the raw DER chain captured by the connector into
//! normalized records and derives the leaf-expiry fact:
//! - Subject distinguished name in canonical attribute order
//! - Expiration ("not valid after") as epoch-milliseconds
//! - Certificate-authority flag from the basic-constraints extension
//!
//! Both operations are pure transforms: the same bytes always produce the
//! same records, in the same order as the input chain.

mod subject;

use chrono::Utc;
use rustls::pki_types::CertificateDer;
use x509_parser::certificate::X509Certificate;
use x509_parser::parse_x509_certificate;

use crate::error_handling::InspectError;
use crate::models::CertificateRecord;

use subject::render_subject;

/// Converts a captured chain into normalized records, one per certificate,
/// preserving presentation order.
///
/// A blob that cannot be decoded aborts the whole call; the result is never
/// a truncated chain.
///
/// # Errors
///
/// Returns [`InspectError::EmptyChainError`] for an empty chain and
/// [`InspectError::MalformedCertificateError`] when a blob cannot be decoded
/// as a certificate structure.
pub fn parse_chain(
    raw: &[CertificateDer<'static>],
) -> Result<Vec<CertificateRecord>, InspectError> {
    if raw.is_empty() {
        return Err(InspectError::EmptyChainError);
    }
    raw.iter()
        .map(|blob| parse_certificate(blob.as_ref()))
        .collect()
}

fn parse_certificate(der: &[u8]) -> Result<CertificateRecord, InspectError> {
    let (rem, cert) = parse_x509_certificate(der)
        .map_err(|e| InspectError::MalformedCertificateError(e.to_string()))?;
    if !rem.is_empty() {
        return Err(InspectError::MalformedCertificateError(format!(
            "{} trailing byte(s) after certificate structure",
            rem.len()
        )));
    }

    Ok(CertificateRecord {
        subject: render_subject(cert.subject())?,
        expires: cert.validity().not_after.timestamp() * 1000,
        isca: is_certificate_authority(&cert),
    })
}

/// True iff a basic-constraints extension is present with `cA = TRUE`.
/// An absent extension is an ordinary end-entity certificate, not an error.
fn is_certificate_authority(cert: &X509Certificate<'_>) -> bool {
    if let Ok(Some(ext)) = cert.basic_constraints() {
        return ext.value.ca;
    }
    false
}

/// Reports whether the leaf certificate (the first record) is expired at the
/// current wall-clock time.
///
/// # Errors
///
/// Returns [`InspectError::EmptyChainError`] for an empty record list.
pub fn is_leaf_expired(records: &[CertificateRecord]) -> Result<bool, InspectError> {
    leaf_expired_at(records, Utc::now().timestamp_millis())
}

/// Clock-parameterized core of [`is_leaf_expired`]: true iff `now_ms` is
/// strictly past the first record's expiration.
///
/// # Errors
///
/// Returns [`InspectError::EmptyChainError`] for an empty record list.
pub fn leaf_expired_at(
    records: &[CertificateRecord],
    now_ms: i64,
) -> Result<bool, InspectError> {
    let leaf = records.first().ok_or(InspectError::EmptyChainError)?;
    Ok(now_ms > leaf.expires)
}
