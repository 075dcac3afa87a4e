// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object store trait for schema-agnostic access to stored objects.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::PluginHubError;
use crate::types::GroupVersionResource;

/// A generic store of untyped JSON objects addressed by
/// (group, version, resource, name).
///
/// Implementations own transport concerns (timeouts, authentication, TLS).
/// Errors must be signalled as:
/// - [`PluginHubError::NotFound`] when no object exists under `name`,
/// - [`PluginHubError::Conflict`] when a write loses a concurrency check,
/// - [`PluginHubError::StoreUnavailable`] for every other failure.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Human-readable name of this store, used in logs.
    fn name(&self) -> &str;

    /// Lists every object in the collection, in the store's native order.
    async fn list(&self, gvr: &GroupVersionResource) -> Result<Vec<Value>, PluginHubError>;

    /// Fetches a single object by name.
    async fn get(&self, gvr: &GroupVersionResource, name: &str) -> Result<Value, PluginHubError>;

    /// Applies an RFC 7386 merge patch to the named object and returns the
    /// object as stored after the patch.
    ///
    /// Fields absent from `patch` must be left untouched.
    async fn patch_merge(
        &self,
        gvr: &GroupVersionResource,
        name: &str,
        patch: &Value,
    ) -> Result<Value, PluginHubError>;
}
