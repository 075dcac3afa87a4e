// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for pluginhub.

use thiserror::Error;

/// The primary error type used across the object store, the plugin manager,
/// and the gateway.
#[derive(Debug, Error)]
pub enum PluginHubError {
    /// Configuration errors (invalid TOML, unreadable token or CA files).
    #[error("configuration error: {0}")]
    Config(String),

    /// No object exists under the given identity.
    #[error("{resource} \"{name}\" not found")]
    NotFound { resource: String, name: String },

    /// A stored object could not be converted into its typed model.
    #[error("failed to decode {name}: field `{field}`: {message}")]
    Decode {
        name: String,
        field: String,
        message: String,
    },

    /// Transport or backing-store failure.
    #[error("object store unavailable: {message}")]
    StoreUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The store rejected a write because of a concurrent modification.
    #[error("conflict writing {name}: {message}")]
    Conflict { name: String, message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PluginHubError {
    /// Returns true for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PluginHubError::NotFound { .. })
    }

    /// Shorthand for a `StoreUnavailable` error wrapping a source error.
    pub fn unavailable<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PluginHubError::StoreUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
