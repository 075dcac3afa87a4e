// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound TLS for the REST listener.
//!
//! TLS 1.2 minimum. Client certificates are optional, but a presented one
//! must chain to the configured CA bundle.

use std::path::Path;
use std::sync::Arc;

use pluginhub_core::PluginHubError;
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};
use tracing::{debug, warn};

/// Build the rustls server configuration from PEM files.
///
/// Every file must be readable. A CA bundle with no certificates disables
/// client certificate verification.
pub fn build_server_tls_config(
    cert_file: &Path,
    key_file: &Path,
    ca_file: &Path,
) -> Result<Arc<ServerConfig>, PluginHubError> {
    let provider = Arc::new(rustls::crypto::aws_lc_rs::default_provider());

    let chain = read_certificates(cert_file)?;
    if chain.is_empty() {
        return Err(PluginHubError::Config(format!(
            "no certificate found in {}",
            cert_file.display()
        )));
    }
    let key = PrivateKeyDer::from_pem_file(key_file).map_err(|e| {
        PluginHubError::Config(format!("invalid private key {}: {e}", key_file.display()))
    })?;

    let mut roots = RootCertStore::empty();
    for cert in read_certificates(ca_file)? {
        roots.add(cert).map_err(|e| {
            PluginHubError::Config(format!("invalid CA certificate in {}: {e}", ca_file.display()))
        })?;
    }

    let verifier = if roots.is_empty() {
        warn!(path = %ca_file.display(), "CA bundle is empty, client certificates are not verified");
        WebPkiClientVerifier::no_client_auth()
    } else {
        debug!(roots = roots.len(), "verifying client certificates when presented");
        WebPkiClientVerifier::builder_with_provider(Arc::new(roots), provider.clone())
            .allow_unauthenticated()
            .build()
            .map_err(|e| PluginHubError::Config(format!("client certificate verifier: {e}")))?
    };

    let mut config = ServerConfig::builder_with_provider(provider)
        .with_protocol_versions(&[&rustls::version::TLS12, &rustls::version::TLS13])
        .map_err(|e| PluginHubError::Config(format!("TLS protocol versions: {e}")))?
        .with_client_cert_verifier(verifier)
        .with_single_cert(chain, key)
        .map_err(|e| {
            PluginHubError::Config(format!(
                "certificate {} does not match key {}: {e}",
                cert_file.display(),
                key_file.display()
            ))
        })?;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    Ok(Arc::new(config))
}

fn read_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>, PluginHubError> {
    let invalid = |e: rustls::pki_types::pem::Error| {
        PluginHubError::Config(format!("invalid PEM file {}: {e}", path.display()))
    };
    CertificateDer::pem_file_iter(path)
        .map_err(invalid)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(invalid)
}
