// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TLS enforcement for the object store connection.
//!
//! Builds the reqwest client used to reach the API server: TLS 1.2
//! minimum, the cluster CA bundle as an extra trust root, and the service
//! account bearer token as a default header.

use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use pluginhub_config::model::StoreConfig;
use pluginhub_core::PluginHubError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::{debug, error, warn};

/// Build the object store HTTP client.
///
/// A missing CA file falls back to the platform trust store, so the same
/// defaults work inside and outside a cluster. A present but unparseable
/// bundle is an error.
pub fn build_store_client(
    config: &StoreConfig,
    token: Option<&str>,
) -> Result<reqwest::Client, PluginHubError> {
    let mut builder = reqwest::Client::builder()
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .timeout(Duration::from_secs(config.timeout_secs));

    for cert in load_ca_bundle(&config.ca_file)? {
        builder = builder.add_root_certificate(cert);
    }

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            PluginHubError::Config(format!("bearer token is not a valid header value: {e}"))
        })?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        builder = builder.default_headers(headers);
    }

    builder.build().map_err(|e| {
        error!("failed to build object store HTTP client: {e}");
        PluginHubError::Config(format!("failed to build object store HTTP client: {e}"))
    })
}

/// Read a bearer token file, trimming trailing whitespace.
///
/// An empty path or a missing file yields `None` (anonymous access).
pub fn read_bearer_token(path: &str) -> Result<Option<String>, PluginHubError> {
    if path.is_empty() {
        return Ok(None);
    }
    let path = Path::new(path);
    if !path.exists() {
        warn!(path = %path.display(), "token file not found, using anonymous access");
        return Ok(None);
    }
    let token = std::fs::read_to_string(path).map_err(|e| {
        PluginHubError::Config(format!("failed to read token file {}: {e}", path.display()))
    })?;
    let token = token.trim().to_string();
    Ok((!token.is_empty()).then_some(token))
}

fn load_ca_bundle(path: &str) -> Result<Vec<reqwest::Certificate>, PluginHubError> {
    if path.is_empty() {
        return Ok(Vec::new());
    }
    let path = Path::new(path);
    if !path.exists() {
        debug!(path = %path.display(), "CA file not found, using platform roots");
        return Ok(Vec::new());
    }
    let pem = std::fs::read(path).map_err(|e| {
        PluginHubError::Config(format!("failed to read CA file {}: {e}", path.display()))
    })?;
    reqwest::Certificate::from_pem_bundle(&pem).map_err(|e| {
        PluginHubError::Config(format!("invalid CA bundle {}: {e}", path.display()))
    })
}

/// Validate an API server URL for transport policy compliance.
///
/// Loopback hosts may use plain HTTP (local proxies such as
/// `kubectl proxy`); every other host must use HTTPS.
pub fn validate_url(url: &str) -> Result<(), PluginHubError> {
    let parsed = url::Url::parse(url)
        .map_err(|e| PluginHubError::Config(format!("invalid API server URL: {e}")))?;

    let loopback = match parsed.host() {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    };
    if loopback {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        error!(url = %url, "TLS required for remote API server");
        return Err(PluginHubError::Config(
            "TLS required for remote API server -- use HTTPS".to_string(),
        ));
    }

    Ok(())
}

/// Check if a host is `localhost` or a loopback IP literal.
///
/// Names are never matched by prefix: `127.example.com` is a remote host.
pub fn is_localhost(addr: &str) -> bool {
    let host = addr
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(addr);
    host.eq_ignore_ascii_case("localhost")
        || host.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
}
