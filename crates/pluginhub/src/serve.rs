// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pluginhub serve` and `pluginhub plugins list`.

use std::sync::Arc;

use pluginhub_config::model::{PluginHubConfig, StoreConfig};
use pluginhub_core::{GroupVersionResource, PluginHubError};
use pluginhub_gateway::{start_server, GatewayState};
use pluginhub_kube::KubeObjectStore;
use pluginhub_plugin::{ConsolePluginManager, ConsolePluginView};
use tracing::info;

use crate::shutdown;

/// Run the REST service until SIGINT or SIGTERM.
pub async fn run_serve(config: PluginHubConfig) -> Result<(), PluginHubError> {
    info!(version = env!("CARGO_PKG_VERSION"), "starting pluginhub");

    let manager = build_manager(&config.store)?;
    info!(resource = %manager.resource(), "plugin registry ready");

    let cancel = shutdown::install_signal_handler();
    start_server(&config.server, GatewayState::new(manager), cancel).await
}

/// List plugins once and print their projections as a JSON array.
pub async fn run_plugins_list(config: PluginHubConfig) -> Result<(), PluginHubError> {
    let manager = build_manager(&config.store)?;
    let plugins = manager.list().await?;
    let views: Vec<ConsolePluginView> = plugins.iter().map(ConsolePluginView::from).collect();
    let json = serde_json::to_string_pretty(&views)
        .map_err(|e| PluginHubError::Internal(format!("failed to render plugins: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Connect the registry manager to the configured API server.
pub fn build_manager(store: &StoreConfig) -> Result<ConsolePluginManager, PluginHubError> {
    let object_store = KubeObjectStore::from_config(store)?;
    let gvr = GroupVersionResource::new(&store.group, &store.version, &store.resource);
    Ok(ConsolePluginManager::with_resource(Arc::new(object_store), gvr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_manager_uses_configured_resource() {
        let store = StoreConfig {
            api_server: Some("https://10.0.0.1:6443".to_string()),
            token_file: String::new(),
            ca_file: String::new(),
            resource: "plugins".to_string(),
            ..StoreConfig::default()
        };
        let manager = build_manager(&store).unwrap();
        assert_eq!(manager.resource().resource, "plugins");
        assert_eq!(manager.resource().group, "console.openfuyao.com");
    }

    #[test]
    fn build_manager_refuses_plain_http_remote() {
        let store = StoreConfig {
            api_server: Some("http://10.0.0.1:6443".to_string()),
            token_file: String::new(),
            ..StoreConfig::default()
        };
        assert!(build_manager(&store).is_err());
    }
}
