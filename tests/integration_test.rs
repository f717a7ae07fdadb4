//! End-to-end inspection against a local TLS server presenting a fixture
//! chain of three certificates: a leaf, an intermediate CA, and a root CA.

use std::sync::Arc;

use anyhow::Result;
use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair,
};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use time::OffsetDateTime;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

use cert_status::{chain_with, is_expired_with, leaf_expired_at, Config};

const LEAF_NOT_AFTER: i64 = 1_770_335_999; // 2026-02-05T23:59:59Z
const INTERMEDIATE_NOT_AFTER: i64 = 1_924_991_999; // 2030-12-31T23:59:59Z
const ROOT_NOT_AFTER: i64 = 1_861_919_999; // 2028-12-31T23:59:59Z
const FAR_FUTURE_NOT_AFTER: i64 = 4_102_444_799; // 2099-12-31T23:59:59Z

struct FixtureServer {
    port: u16,
}

fn ca_params(cn: &str, not_after: i64) -> CertificateParams {
    let mut params = CertificateParams::new(vec![]).unwrap();
    params.distinguished_name = DistinguishedName::new();
    params.distinguished_name.push(DnType::CommonName, cn);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.not_after = OffsetDateTime::from_unix_timestamp(not_after).unwrap();
    params
}

/// Builds the github.com fixture chain, leaf first, plus the leaf's key.
fn fixture_chain(leaf_not_after: i64) -> (Vec<CertificateDer<'static>>, KeyPair) {
    let root_key = KeyPair::generate().unwrap();
    let root_cert = ca_params("USERTrust ECC Certification Authority", ROOT_NOT_AFTER)
        .self_signed(&root_key)
        .unwrap();

    let inter_key = KeyPair::generate().unwrap();
    let inter_cert = ca_params(
        "Sectigo ECC Domain Validation Secure Server CA",
        INTERMEDIATE_NOT_AFTER,
    )
    .signed_by(&inter_key, &root_cert, &root_key)
    .unwrap();

    let leaf_key = KeyPair::generate().unwrap();
    let mut leaf_params = CertificateParams::new(vec!["github.com".to_string()]).unwrap();
    leaf_params.distinguished_name = DistinguishedName::new();
    leaf_params
        .distinguished_name
        .push(DnType::CommonName, "github.com");
    leaf_params.is_ca = IsCa::NoCa;
    leaf_params.not_after = OffsetDateTime::from_unix_timestamp(leaf_not_after).unwrap();
    let leaf_cert = leaf_params
        .signed_by(&leaf_key, &inter_cert, &inter_key)
        .unwrap();

    let chain = vec![
        leaf_cert.der().clone(),
        inter_cert.der().clone(),
        root_cert.der().clone(),
    ];
    (chain, leaf_key)
}

fn single_cert_chain(cn: &str, not_after: i64) -> (Vec<CertificateDer<'static>>, KeyPair) {
    let key = KeyPair::generate().unwrap();
    let mut params = CertificateParams::new(vec![cn.to_string()]).unwrap();
    params.distinguished_name = DistinguishedName::new();
    params.distinguished_name.push(DnType::CommonName, cn);
    params.is_ca = IsCa::NoCa;
    params.not_after = OffsetDateTime::from_unix_timestamp(not_after).unwrap();
    let cert: Certificate = params.self_signed(&key).unwrap();
    (vec![cert.der().clone()], key)
}

/// Serves exactly one TLS connection with the given chain, then exits.
async fn serve_once(chain: Vec<CertificateDer<'static>>, key: &KeyPair) -> Result<FixtureServer> {
    let _ = env_logger::builder().is_test(true).try_init();

    let server_config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(chain, PrivateKeyDer::Pkcs8(key.serialize_der().into()))?;
    let acceptor = TlsAcceptor::from(Arc::new(server_config));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            if let Ok(mut tls) = acceptor.accept(stream).await {
                // Hold the session open until the peer closes it.
                let mut buf = [0u8; 16];
                let _ = tls.read(&mut buf).await;
            }
        }
    });

    Ok(FixtureServer { port })
}

#[tokio::test]
async fn test_chain_returns_all_records_in_presentation_order() -> Result<()> {
    let (chain, leaf_key) = fixture_chain(LEAF_NOT_AFTER);
    let server = serve_once(chain, &leaf_key).await?;

    let records = chain_with(&format!("127.0.0.1:{}", server.port), &Config::default()).await?;

    assert_eq!(records.len(), 3);

    assert_eq!(records[0].subject, "CN=github.com");
    assert_eq!(records[0].expires, LEAF_NOT_AFTER * 1000);
    assert!(!records[0].isca);

    assert_eq!(
        records[1].subject,
        "CN=Sectigo ECC Domain Validation Secure Server CA"
    );
    assert_eq!(records[1].expires, INTERMEDIATE_NOT_AFTER * 1000);
    assert!(records[1].isca);

    assert_eq!(records[2].subject, "CN=USERTrust ECC Certification Authority");
    assert_eq!(records[2].expires, ROOT_NOT_AFTER * 1000);
    assert!(records[2].isca);

    // The leaf-expiry fact derived from these records flips exactly at the
    // leaf's own boundary, regardless of the CA expirations.
    assert!(!leaf_expired_at(&records, LEAF_NOT_AFTER * 1000).unwrap());
    assert!(leaf_expired_at(&records, LEAF_NOT_AFTER * 1000 + 1).unwrap());

    Ok(())
}

#[tokio::test]
async fn test_is_expired_reports_a_fresh_leaf_as_valid() -> Result<()> {
    let (chain, key) = single_cert_chain("fresh.example", FAR_FUTURE_NOT_AFTER);
    let server = serve_once(chain, &key).await?;

    let expired =
        is_expired_with(&format!("127.0.0.1:{}", server.port), &Config::default()).await?;
    assert!(!expired);

    Ok(())
}

#[tokio::test]
async fn test_is_expired_reports_an_expired_leaf_without_a_trust_failure() -> Result<()> {
    // Long past its validity window; the handshake must still complete so
    // the chain can be inspected.
    let (chain, key) = single_cert_chain("stale.example", 1_577_836_799); // 2019-12-31
    let server = serve_once(chain, &key).await?;

    let expired =
        is_expired_with(&format!("127.0.0.1:{}", server.port), &Config::default()).await?;
    assert!(expired);

    Ok(())
}

#[tokio::test]
async fn test_records_serialize_for_the_host_boundary() -> Result<()> {
    let (chain, key) = single_cert_chain("fresh.example", FAR_FUTURE_NOT_AFTER);
    let server = serve_once(chain, &key).await?;

    let records = chain_with(&format!("127.0.0.1:{}", server.port), &Config::default()).await?;
    let json = serde_json::to_value(&records)?;

    assert_eq!(
        json,
        serde_json::json!([{
            "subject": "CN=fresh.example",
            "expires": FAR_FUTURE_NOT_AFTER * 1000,
            "isca": false,
        }])
    );

    Ok(())
}
