//! Canonical subject rendering.
//!
//! Certificate-parsing libraries expose distinguished-name attributes in
//! whatever order suits them, so the canonical order is applied here rather
//! than delegated to the parser's own string form. Attributes render as
//! `KEY=value`, comma-joined, in the order: Common Name, Organization,
//! Organizational Unit, Locality, State/Province, Country, then any
//! remaining attribute types in their encoded order.

use x509_parser::oid_registry::{
    OID_X509_COMMON_NAME, OID_X509_COUNTRY_NAME, OID_X509_LOCALITY_NAME,
    OID_X509_ORGANIZATIONAL_UNIT, OID_X509_ORGANIZATION_NAME, OID_X509_STATE_OR_PROVINCE_NAME,
};
use x509_parser::x509::{AttributeTypeAndValue, X509Name};

use crate::error_handling::InspectError;

/// Renders a subject distinguished name in canonical attribute order.
///
/// Attributes with empty values are omitted rather than rendered as empty
/// pairs. The same decoded name always renders to the same string.
///
/// # Errors
///
/// Returns [`InspectError::MalformedCertificateError`] when an attribute
/// value cannot be read as a string.
pub(crate) fn render_subject(name: &X509Name<'_>) -> Result<String, InspectError> {
    let canonical = [
        (&OID_X509_COMMON_NAME, "CN"),
        (&OID_X509_ORGANIZATION_NAME, "O"),
        (&OID_X509_ORGANIZATIONAL_UNIT, "OU"),
        (&OID_X509_LOCALITY_NAME, "L"),
        (&OID_X509_STATE_OR_PROVINCE_NAME, "ST"),
        (&OID_X509_COUNTRY_NAME, "C"),
    ];

    let mut parts: Vec<String> = Vec::new();

    for (oid, key) in canonical {
        for attr in attributes_of(name).filter(|attr| attr.attr_type() == oid) {
            push_component(&mut parts, key, attr)?;
        }
    }

    // Anything outside the canonical set keeps its encoded order at the end.
    for attr in attributes_of(name)
        .filter(|attr| !canonical.iter().any(|(oid, _)| attr.attr_type() == *oid))
    {
        let oid_string = attr.attr_type().to_id_string();
        push_component(&mut parts, attribute_key(&oid_string), attr)?;
    }

    Ok(parts.join(","))
}

/// Flattens the RDN sequence into its attributes, preserving encoded order.
fn attributes_of<'a, 'b>(
    name: &'a X509Name<'b>,
) -> impl Iterator<Item = &'a AttributeTypeAndValue<'b>> {
    name.iter().flat_map(|rdn| rdn.iter())
}

fn push_component(
    parts: &mut Vec<String>,
    key: &str,
    attr: &AttributeTypeAndValue<'_>,
) -> Result<(), InspectError> {
    let value = attr.attr_value().as_str().map_err(|e| {
        InspectError::MalformedCertificateError(format!(
            "unreadable subject attribute {key}: {e}"
        ))
    })?;
    if !value.is_empty() {
        parts.push(format!("{key}={value}"));
    }
    Ok(())
}

/// Short key for a non-canonical attribute type, falling back to the dotted
/// OID when no abbreviation is registered.
fn attribute_key(oid: &str) -> &str {
    match oid {
        "2.5.4.5" => "serialNumber",
        "2.5.4.9" => "street",
        "2.5.4.17" => "postalCode",
        "1.2.840.113549.1.9.1" => "emailAddress",
        "0.9.2342.19200300.100.1.25" => "DC",
        other => other,
    }
}
