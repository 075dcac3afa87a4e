// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin registry manager.
//!
//! [`ConsolePluginManager`] is the single authority for reading plugin
//! records and toggling their enablement. It holds no state beyond the
//! store handle, never retries, and never caches.

use std::sync::Arc;

use pluginhub_core::{GroupVersionResource, ObjectStore, PluginHubError};
use pluginhub_security::sanitize_log_string;
use tracing::{debug, error, info};

use crate::model::{decode_console_plugin, encode_enablement_patch, ConsolePlugin};

/// Whether `set_enablement` wrote to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetEnablementOutcome {
    /// A merge patch was applied.
    Patched,
    /// The record already had the desired value; nothing was written.
    Unchanged,
}

/// Reads ConsolePlugin records and applies enablement changes.
#[derive(Clone)]
pub struct ConsolePluginManager {
    store: Arc<dyn ObjectStore>,
    gvr: GroupVersionResource,
}

impl ConsolePluginManager {
    /// Manage the standard ConsolePlugin collection.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_resource(store, GroupVersionResource::console_plugins())
    }

    /// Manage plugins served under a non-default group/version/resource.
    pub fn with_resource(store: Arc<dyn ObjectStore>, gvr: GroupVersionResource) -> Self {
        Self { store, gvr }
    }

    pub fn resource(&self) -> &GroupVersionResource {
        &self.gvr
    }

    /// All plugin records in store order.
    ///
    /// One undecodable item fails the whole call.
    pub async fn list(&self) -> Result<Vec<ConsolePlugin>, PluginHubError> {
        let objects = self.store.list(&self.gvr).await?;
        let plugins = objects
            .iter()
            .map(decode_console_plugin)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| error!(error = %e, "failed to decode listed ConsolePlugin"))?;
        debug!(count = plugins.len(), store = self.store.name(), "listed ConsolePlugins");
        Ok(plugins)
    }

    /// The record named `plugin_name`.
    pub async fn get(&self, plugin_name: &str) -> Result<ConsolePlugin, PluginHubError> {
        let object = self.store.get(&self.gvr, plugin_name).await?;
        decode_console_plugin(&object).inspect_err(|e| {
            error!(
                plugin = %sanitize_log_string(plugin_name),
                error = %e,
                "failed to decode ConsolePlugin"
            )
        })
    }

    /// True when a readable record named `plugin_name` exists.
    pub async fn is_installed(&self, plugin_name: &str) -> bool {
        self.get(plugin_name).await.is_ok()
    }

    /// Current `spec.enabled` of the record.
    pub async fn check_enablement(&self, plugin_name: &str) -> Result<bool, PluginHubError> {
        Ok(self.get(plugin_name).await?.spec.enabled)
    }

    /// Set `spec.enabled` to `desired`.
    ///
    /// Reads first and skips the write when the value already matches.
    /// Otherwise sends a merge patch carrying only `spec.enabled`.
    pub async fn set_enablement(
        &self,
        plugin_name: &str,
        desired: bool,
    ) -> Result<SetEnablementOutcome, PluginHubError> {
        let current = self.get(plugin_name).await?;
        let plugin = sanitize_log_string(plugin_name);

        if current.spec.enabled == desired {
            info!(plugin = %plugin, enabled = desired, "enablement already satisfied, skipping patch");
            return Ok(SetEnablementOutcome::Unchanged);
        }

        let patch = encode_enablement_patch(desired);
        self.store
            .patch_merge(&self.gvr, plugin_name, &patch)
            .await
            .inspect_err(|e| error!(plugin = %plugin, error = %e, "failed to patch ConsolePlugin"))?;

        info!(plugin = %plugin, enabled = desired, "ConsolePlugin enablement updated");
        Ok(SetEnablementOutcome::Patched)
    }
}
