// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for pluginhub.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level pluginhub configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginHubConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Object store (cluster API server) settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to bind. Also settable through the `SERVICE_PORT` variable.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix every API route is mounted under.
    #[serde(default = "default_api_root")]
    pub api_root: String,

    /// Serve HTTPS. Also settable through `ENABLE_TLS`. Plain HTTP is kept
    /// when `tls_cert_file` does not exist.
    #[serde(default)]
    pub enable_tls: bool,

    /// PEM certificate chain presented to clients.
    #[serde(default = "default_tls_cert_file")]
    pub tls_cert_file: String,

    /// PEM private key for `tls_cert_file`.
    #[serde(default = "default_tls_key_file")]
    pub tls_key_file: String,

    /// PEM bundle that client certificates are verified against when a
    /// client presents one.
    #[serde(default = "default_tls_ca_file")]
    pub tls_ca_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            api_root: default_api_root(),
            enable_tls: false,
            tls_cert_file: default_tls_cert_file(),
            tls_key_file: default_tls_key_file(),
            tls_ca_file: default_tls_ca_file(),
        }
    }
}

fn default_tls_cert_file() -> String {
    "/ssl/server.crt".to_string()
}

fn default_tls_key_file() -> String {
    "/ssl/server.key".to_string()
}

fn default_tls_ca_file() -> String {
    "/ssl/ca.pem".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9040
}

fn default_api_root() -> String {
    "/rest/plugin-management/v1beta1".to_string()
}

/// Object store configuration.
///
/// Defaults target the in-cluster API server with the pod's service
/// account credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// API server base URL. `None` resolves from `KUBERNETES_SERVICE_HOST`
    /// and `KUBERNETES_SERVICE_PORT` at startup.
    #[serde(default)]
    pub api_server: Option<String>,

    /// File holding the bearer token. Empty disables authentication.
    #[serde(default = "default_token_file")]
    pub token_file: String,

    /// PEM bundle used to verify the API server. Empty trusts only the
    /// platform's root store.
    #[serde(default = "default_ca_file")]
    pub ca_file: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// API group of the plugin resource.
    #[serde(default = "default_group")]
    pub group: String,

    /// API version of the plugin resource.
    #[serde(default = "default_version")]
    pub version: String,

    /// Plural resource name of the plugin resource.
    #[serde(default = "default_resource")]
    pub resource: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_server: None,
            token_file: default_token_file(),
            ca_file: default_ca_file(),
            timeout_secs: default_timeout_secs(),
            group: default_group(),
            version: default_version(),
            resource: default_resource(),
        }
    }
}

fn default_token_file() -> String {
    "/var/run/secrets/kubernetes.io/serviceaccount/token".to_string()
}

fn default_ca_file() -> String {
    "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_group() -> String {
    "console.openfuyao.com".to_string()
}

fn default_version() -> String {
    "v1beta1".to_string()
}

fn default_resource() -> String {
    "consoleplugins".to_string()
}

/// Log record encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line records.
    #[default]
    Console,
    /// One JSON object per record.
    Json,
}

/// Where log records are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Console,
    File,
    Both,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Level filter (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Directory for rotated log files.
    #[serde(default = "default_log_directory")]
    pub directory: String,

    /// Base file name; a date suffix is appended on daily rotation.
    #[serde(default = "default_log_file_name")]
    pub file_name: String,

    /// Rotated files kept on disk; older ones are deleted.
    #[serde(default = "default_log_max_files")]
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            directory: default_log_directory(),
            file_name: default_log_file_name(),
            max_files: default_log_max_files(),
        }
    }
}

fn default_log_max_files() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "/var/log/pluginhub".to_string()
}

fn default_log_file_name() -> String {
    "pluginhub.log".to_string()
}
