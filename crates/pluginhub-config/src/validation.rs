// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde cannot express: a usable bind
//! address, a rooted API prefix, a parseable API server URL.

use crate::diagnostic::ConfigError;
use crate::model::PluginHubConfig;

/// Level names accepted by `log.level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &PluginHubConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let addr = config.server.bind_address.trim();
    if addr.is_empty() {
        errors.push(validation("server.bind_address must not be empty".to_string()));
    } else {
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(validation(format!(
                "server.bind_address `{addr}` is not a valid IP address or hostname"
            )));
        }
    }

    if config.server.port == 0 {
        errors.push(validation("server.port must be between 1 and 65535".to_string()));
    }

    let api_root = &config.server.api_root;
    if !api_root.starts_with('/') {
        errors.push(validation(format!(
            "server.api_root `{api_root}` must start with `/`"
        )));
    } else if api_root.len() > 1 && api_root.ends_with('/') {
        errors.push(validation(format!(
            "server.api_root `{api_root}` must not end with `/`"
        )));
    }

    if config.server.enable_tls {
        for (key, value) in [
            ("server.tls_cert_file", &config.server.tls_cert_file),
            ("server.tls_key_file", &config.server.tls_key_file),
            ("server.tls_ca_file", &config.server.tls_ca_file),
        ] {
            if value.trim().is_empty() {
                errors.push(validation(format!("{key} must not be empty when TLS is enabled")));
            }
        }
    }

    if let Some(api_server) = &config.store.api_server {
        match url::Url::parse(api_server) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => errors.push(validation(format!(
                "store.api_server must use http or https, got `{}`",
                parsed.scheme()
            ))),
            Err(e) => errors.push(validation(format!(
                "store.api_server `{api_server}` is not a valid URL: {e}"
            ))),
        }
    }

    if config.store.timeout_secs == 0 {
        errors.push(validation("store.timeout_secs must be greater than 0".to_string()));
    }

    for (key, value) in [
        ("store.group", &config.store.group),
        ("store.version", &config.store.version),
        ("store.resource", &config.store.resource),
    ] {
        // The core group is empty; version and resource are not.
        if key != "store.group" && value.trim().is_empty() {
            errors.push(validation(format!("{key} must not be empty")));
        }
        if value.contains('/') {
            errors.push(validation(format!("{key} `{value}` must not contain `/`")));
        }
    }

    let level = config.log.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(validation(format!(
            "log.level `{}` is not one of: {}",
            config.log.level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.log.file_name.trim().is_empty() {
        errors.push(validation("log.file_name must not be empty".to_string()));
    }

    if config.log.max_files == 0 {
        errors.push(validation("log.max_files must be at least 1".to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validation(message: String) -> ConfigError {
    ConfigError::Validation { message }
}
