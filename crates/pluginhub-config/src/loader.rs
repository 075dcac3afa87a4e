// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./pluginhub.toml` > `~/.config/pluginhub/pluginhub.toml`
//! > `/etc/pluginhub/pluginhub.toml`, then the deployment variables
//! `SERVICE_PORT` / `ENABLE_TLS`, then `PLUGINHUB_*` overrides.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PluginHubConfig;

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pluginhub/pluginhub.toml` (system-wide)
/// 3. `~/.config/pluginhub/pluginhub.toml` (user XDG config)
/// 4. `./pluginhub.toml` (local directory)
/// 5. `SERVICE_PORT` and `ENABLE_TLS`
/// 6. `PLUGINHUB_*` environment variables
pub fn load_config() -> Result<PluginHubConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PluginHubConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PluginHubConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PluginHubConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PluginHubConfig::default()))
        .merge(Toml::file(path))
        .merge(deployment_env_provider())
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading.
///
/// Returned before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PluginHubConfig::default()))
        .merge(Toml::file("/etc/pluginhub/pluginhub.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("pluginhub/pluginhub.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("pluginhub.toml"))
        .merge(deployment_env_provider())
        .merge(env_provider())
}

/// Variables set by the deployment manifests, mapped onto `[server]`.
fn deployment_env_provider() -> Env {
    Env::raw()
        .only(&["SERVICE_PORT", "ENABLE_TLS"])
        .map(|key| match key.as_str().to_ascii_lowercase().as_str() {
            "service_port" => "server.port".into(),
            "enable_tls" => "server.enable_tls".into(),
            other => other.to_string().into(),
        })
}

/// `PLUGINHUB_*` variables with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `PLUGINHUB_STORE_TIMEOUT_SECS` must become
/// `store.timeout_secs`, not `store.timeout.secs`.
fn env_provider() -> Env {
    Env::prefixed("PLUGINHUB_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("server_", "server.", 1)
            .replacen("store_", "store.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
