// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-facing shape of a ConsolePlugin.

use serde::Serialize;

use crate::model::{ConsolePlugin, SubPage};

/// The fields the console needs to render a plugin entry.
///
/// Every key is always present except `order`, which is omitted when the
/// record has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolePluginView {
    /// Release annotation, empty when absent.
    pub release: String,
    pub display_name: String,
    pub plugin_name: String,
    /// Decimal rendering of `spec.order`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    pub sub_pages: Vec<SubPage>,
    pub entrypoint: String,
    /// Copied from `status.link`.
    pub url: String,
    pub enabled: bool,
}

impl From<&ConsolePlugin> for ConsolePluginView {
    fn from(plugin: &ConsolePlugin) -> Self {
        Self {
            release: plugin.release().unwrap_or_default().to_string(),
            display_name: plugin.spec.display_name.clone(),
            plugin_name: plugin.spec.plugin_name.clone(),
            order: plugin.spec.order.map(|o| o.to_string()),
            sub_pages: plugin.spec.sub_pages.clone(),
            entrypoint: plugin.spec.entrypoint.to_string(),
            url: plugin.status.link.clone(),
            enabled: plugin.spec.enabled,
        }
    }
}

/// The body of a successful enablement check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnablementView {
    pub plugin_name: String,
    pub enabled: bool,
}
