// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by object store implementations and their callers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// API group of the ConsolePlugin custom resource.
pub const CONSOLE_PLUGIN_GROUP: &str = "console.openfuyao.com";

/// API version of the ConsolePlugin custom resource.
pub const CONSOLE_PLUGIN_VERSION: &str = "v1beta1";

/// Plural resource name of the ConsolePlugin custom resource.
pub const CONSOLE_PLUGIN_RESOURCE: &str = "consoleplugins";

/// Identifies a collection of objects in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersionResource {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl GroupVersionResource {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
        }
    }

    /// The ConsolePlugin collection (`console.openfuyao.com/v1beta1/consoleplugins`).
    pub fn console_plugins() -> Self {
        Self::new(
            CONSOLE_PLUGIN_GROUP,
            CONSOLE_PLUGIN_VERSION,
            CONSOLE_PLUGIN_RESOURCE,
        )
    }

    /// `group/version`, or just `version` for the core group.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl std::fmt::Display for GroupVersionResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.api_version(), self.resource)
    }
}

/// Patch strategies an object store may be asked to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum PatchType {
    /// RFC 7386 JSON merge patch.
    #[strum(serialize = "application/merge-patch+json")]
    Merge,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_plugins_gvr() {
        let gvr = GroupVersionResource::console_plugins();
        assert_eq!(gvr.api_version(), "console.openfuyao.com/v1beta1");
        assert_eq!(gvr.to_string(), "console.openfuyao.com/v1beta1/consoleplugins");
    }

    #[test]
    fn core_group_api_version_has_no_slash() {
        let gvr = GroupVersionResource::new("", "v1", "configmaps");
        assert_eq!(gvr.api_version(), "v1");
    }

    #[test]
    fn merge_patch_content_type() {
        assert_eq!(PatchType::Merge.to_string(), "application/merge-patch+json");
    }
}
