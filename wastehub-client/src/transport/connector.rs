//! TLS connector construction for [`HttpTransport`](super::HttpTransport).
//!
//! # Feature Flags
//!
//! - `tls-ring` / `tls-aws-lc`: which crypto provider backs rustls. With
//!   neither enabled, the process-level default provider is used if one has
//!   been installed.
//! - `tls-native-roots` / `tls-webpki-roots`: where trusted roots come from.
//!   Native roots win when both are enabled.
//!
//! The default `tls` feature selects `tls-ring` + `tls-native-roots`.

use std::sync::Arc;

use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{
    ClientConfig, ConfigBuilder, DigitallySignedStruct, RootCertStore, SignatureScheme,
    WantsVerifier,
};

/// Config builder backed by whichever crypto provider the features picked.
fn try_get_crypto_provider_builder() -> Option<ConfigBuilder<ClientConfig, WantsVerifier>> {
    #[cfg(feature = "tls-ring")]
    return Some({
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .expect("safe default protocol versions should be valid")
    });

    #[cfg(all(feature = "tls-aws-lc", not(feature = "tls-ring")))]
    return Some({
        let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());
        ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .expect("safe default protocol versions should be valid")
    });

    #[cfg(not(any(feature = "tls-ring", feature = "tls-aws-lc")))]
    {
        rustls::crypto::CryptoProvider::get_default().map(|provider| {
            ClientConfig::builder_with_provider(provider.clone())
                .with_safe_default_protocol_versions()
                .expect("safe default protocol versions should be valid")
        })
    }
}

#[cfg(any(feature = "tls-native-roots", feature = "tls-webpki-roots"))]
fn build_root_store() -> RootCertStore {
    let mut root_store = RootCertStore::empty();

    #[cfg(feature = "tls-native-roots")]
    {
        let result = rustls_native_certs::load_native_certs();
        for cert in result.certs {
            let _ = root_store.add(cert);
        }
        #[cfg(feature = "tracing")]
        for error in result.errors {
            tracing::debug!("failed to load a native root certificate: {}", error);
        }
    }

    #[cfg(all(feature = "tls-webpki-roots", not(feature = "tls-native-roots")))]
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    root_store
}

/// TLS config with the default provider and the configured root store.
/// `None` when no root-store feature is enabled.
#[cfg(any(feature = "tls-native-roots", feature = "tls-webpki-roots"))]
pub(crate) fn default_tls_config() -> Option<ClientConfig> {
    let builder = try_get_crypto_provider_builder()?;
    Some(
        builder
            .with_root_certificates(build_root_store())
            .with_no_client_auth(),
    )
}

#[cfg(not(any(feature = "tls-native-roots", feature = "tls-webpki-roots")))]
pub(crate) fn default_tls_config() -> Option<ClientConfig> {
    None
}

/// Connector behind the pooled client. Accepts both `https` and plain
/// `http` addresses and negotiates HTTP/2 over ALPN where offered.
///
/// # Panics
///
/// Panics when no TLS config was supplied and none can be built from the
/// enabled features.
pub(crate) fn build_https_connector(
    tls_config: Option<ClientConfig>,
) -> HttpsConnector<HttpConnector> {
    let config = match tls_config.or_else(default_tls_config) {
        Some(config) => config,
        None => panic!(
            "no TLS configuration available: enable the `tls` feature (or one of \
             `tls-ring`/`tls-aws-lc` plus `tls-native-roots`/`tls-webpki-roots`), \
             install a process-level rustls provider, or pass a ClientConfig \
             through HttpTransportBuilder::tls_config"
        ),
    };

    HttpsConnectorBuilder::new()
        .with_tls_config(config)
        .https_or_http()
        .enable_all_versions()
        .build()
}

/// Verifier that accepts every certificate without looking at it.
#[derive(Debug)]
struct DangerousAcceptAnyCertVerifier;

impl ServerCertVerifier for DangerousAcceptAnyCertVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA1,
            SignatureScheme::ECDSA_SHA1_Legacy,
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
            SignatureScheme::ED448,
        ]
    }
}

/// Config that skips certificate verification entirely. Development only;
/// `None` when no crypto provider is available.
pub(crate) fn danger_accept_invalid_certs_config() -> Option<ClientConfig> {
    let builder = try_get_crypto_provider_builder()?;
    let mut config = builder
        .with_root_certificates(RootCertStore::empty())
        .with_no_client_auth();
    config
        .dangerous()
        .set_certificate_verifier(Arc::new(DangerousAcceptAnyCertVerifier));
    Some(config)
}
