use serde::{Deserialize, Serialize};

/// A normalized description of one certificate in a presented chain.
///
/// Records are immutable once produced and serialize with exactly the field
/// names `subject`, `expires`, and `isca`, which is the shape handed across
/// the host boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Subject distinguished name rendered as comma-joined `KEY=value`
    /// components in canonical order.
    pub subject: String,
    /// The "not valid after" instant, milliseconds since the Unix epoch (UTC).
    pub expires: i64,
    /// Whether the basic-constraints extension marks this certificate as a CA.
    pub isca: bool,
}
