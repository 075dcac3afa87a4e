// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed ConsolePlugin record and its decode from the store's untyped form.
//!
//! Stored objects arrive as `serde_json::Value`. [`decode_console_plugin`]
//! checks required fields and enumerations first, then decodes each member
//! on its own so a malformed object fails with the offending field named.
//! An explicit `null` in an optional member reads as its default.

use std::collections::BTreeMap;

use pluginhub_core::PluginHubError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use strum::{AsRefStr, Display, EnumString};

/// Annotation recording the packaging release that installed a plugin.
pub const RELEASE_ANNOTATION: &str = "meta.helm.sh/release-name";

/// A ConsolePlugin custom resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolePlugin {
    #[serde(default)]
    pub api_version: String,

    #[serde(default)]
    pub kind: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,

    pub spec: ConsolePluginSpec,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ConsolePluginStatus,
}

impl ConsolePlugin {
    /// The release annotation, if the object carries one.
    pub fn release(&self) -> Option<&str> {
        self.metadata.release()
    }
}

/// The subset of object metadata this service reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    pub fn release(&self) -> Option<&str> {
        self.annotations.get(RELEASE_ANNOTATION).map(String::as_str)
    }
}

/// Declared state of a plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolePluginSpec {
    /// Unique, immutable identity. Equals `metadata.name`.
    pub plugin_name: String,

    /// Presentation order. Carried as stored; never range-checked here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,

    /// Pages under the plugin; only meaningful for [`Entrypoint::Side`].
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sub_pages: Vec<SubPage>,

    pub entrypoint: Entrypoint,

    pub backend: ConsolePluginBackend,

    /// The only field this service writes. Missing decodes as `false`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
}

/// A page nested under a side-menu plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
}

/// Where the plugin surfaces in the console.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum Entrypoint {
    /// Top navigation bar.
    Nav,
    /// Side menu.
    Side,
}

/// The server that supplies the plugin's UI resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConsolePluginBackend {
    Service { service: ServiceBackend },
}

impl ConsolePluginBackend {
    /// Type tags accepted in `spec.backend.type`.
    pub const TYPES: &'static [&'static str] = &["Service"];
}

/// A cluster service serving plugin UI resources over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBackend {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace: String,

    #[serde(default = "default_service_port", deserialize_with = "port_or_default")]
    pub port: u16,

    #[serde(default = "default_base_path", deserialize_with = "base_path_or_default")]
    pub base_path: String,
}

fn default_service_port() -> u16 {
    80
}

fn default_base_path() -> String {
    "/".to_string()
}

/// Treat an explicit `null` like a missing member.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn port_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_service_port))
}

fn base_path_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_base_path))
}

/// Observed state, written by an external reconciler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolePluginStatus {
    /// URL the console loads the plugin from.
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
}

/// Required members, as JSON pointers, checked before deserializing.
const REQUIRED_FIELDS: &[&str] = &[
    "/spec",
    "/spec/pluginName",
    "/spec/entrypoint",
    "/spec/backend",
    "/spec/backend/type",
];

/// Convert an untyped stored object into a [`ConsolePlugin`].
///
/// Fails with [`PluginHubError::Decode`] naming the first offending field.
/// Optional members fall back to their defaults; required ones never do.
pub fn decode_console_plugin(object: &Value) -> Result<ConsolePlugin, PluginHubError> {
    let name = object
        .pointer("/metadata/name")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>");
    let decode_err = |field: &str, message: String| PluginHubError::Decode {
        name: name.to_string(),
        field: field.to_string(),
        message,
    };
    let members = Members { object, name };

    for pointer in REQUIRED_FIELDS {
        match object.pointer(pointer) {
            None | Some(Value::Null) => {
                return Err(decode_err(&field_path(pointer), "missing required field".into()));
            }
            Some(_) => {}
        }
    }

    let entrypoint = object.pointer("/spec/entrypoint").unwrap_or(&Value::Null);
    match entrypoint.as_str() {
        Some(tag) if tag.parse::<Entrypoint>().is_ok() => {}
        _ => {
            return Err(decode_err(
                "spec.entrypoint",
                format!("expected one of [Nav, Side], got {entrypoint}"),
            ));
        }
    }

    let backend_type = object.pointer("/spec/backend/type").unwrap_or(&Value::Null);
    match backend_type.as_str() {
        Some(tag) if ConsolePluginBackend::TYPES.contains(&tag) => {
            let service = object.pointer("/spec/backend/service");
            if !matches!(service, Some(Value::Object(_))) {
                return Err(decode_err(
                    "spec.backend.service",
                    "missing required field".into(),
                ));
            }
        }
        _ => {
            return Err(decode_err(
                "spec.backend.type",
                format!(
                    "expected one of [{}], got {backend_type}",
                    ConsolePluginBackend::TYPES.join(", ")
                ),
            ));
        }
    }

    let spec = ConsolePluginSpec {
        plugin_name: members.required("/spec/pluginName")?,
        order: members.optional("/spec/order")?,
        display_name: members.optional("/spec/displayName")?,
        sub_pages: members.optional("/spec/subPages")?,
        entrypoint: members.required("/spec/entrypoint")?,
        backend: members.required("/spec/backend")?,
        enabled: members.optional("/spec/enabled")?,
    };

    Ok(ConsolePlugin {
        api_version: members.optional("/apiVersion")?,
        kind: members.optional("/kind")?,
        metadata: members.optional("/metadata")?,
        spec,
        status: members.optional("/status")?,
    })
}

/// Decodes one member of a stored object at a time, so errors name it.
struct Members<'a> {
    object: &'a Value,
    name: &'a str,
}

impl Members<'_> {
    fn required<T: DeserializeOwned>(&self, pointer: &str) -> Result<T, PluginHubError> {
        match self.object.pointer(pointer) {
            None | Some(Value::Null) => Err(self.error(pointer, "missing required field".into())),
            Some(value) => self.parse(pointer, value),
        }
    }

    fn optional<T: DeserializeOwned + Default>(&self, pointer: &str) -> Result<T, PluginHubError> {
        match self.object.pointer(pointer) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(value) => self.parse(pointer, value),
        }
    }

    fn parse<T: DeserializeOwned>(&self, pointer: &str, value: &Value) -> Result<T, PluginHubError> {
        T::deserialize(value).map_err(|e| self.error(pointer, e.to_string()))
    }

    fn error(&self, pointer: &str, message: String) -> PluginHubError {
        PluginHubError::Decode {
            name: self.name.to_string(),
            field: field_path(pointer),
            message,
        }
    }
}

/// Build the merge patch that sets `spec.enabled` and touches nothing else.
pub fn encode_enablement_patch(enabled: bool) -> Value {
    json!({ "spec": { "enabled": enabled } })
}

fn field_path(pointer: &str) -> String {
    pointer.trim_start_matches('/').replace('/', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pluginhub_test_utils::{dummy_plugin, test_plugin, PluginObject};

    fn decode_field(object: &Value) -> String {
        match decode_console_plugin(object) {
            Err(PluginHubError::Decode { field, .. }) => field,
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn decodes_full_object() {
        let object = PluginObject::new("monitoring")
            .display_name("Monitoring")
            .entrypoint("Side")
            .enabled(true)
            .order(3)
            .sub_page("alerts", "Alerts")
            .release("monitoring-release")
            .link("/proxy/monitoring")
            .port(8080)
            .build();

        let plugin = decode_console_plugin(&object).unwrap();
        assert_eq!(plugin.metadata.name, "monitoring");
        assert_eq!(plugin.spec.plugin_name, "monitoring");
        assert_eq!(plugin.spec.order, Some(3));
        assert_eq!(plugin.spec.entrypoint, Entrypoint::Side);
        assert_eq!(plugin.spec.sub_pages.len(), 1);
        assert_eq!(plugin.spec.sub_pages[0].page_name, "alerts");
        assert!(plugin.spec.enabled);
        assert_eq!(plugin.status.link, "/proxy/monitoring");
        assert_eq!(plugin.release(), Some("monitoring-release"));
        let ConsolePluginBackend::Service { service } = &plugin.spec.backend;
        assert_eq!(service.name, "monitoring-svc");
        assert_eq!(service.port, 8080);
    }

    #[test]
    fn service_defaults_apply() {
        let plugin = decode_console_plugin(&dummy_plugin()).unwrap();
        let ConsolePluginBackend::Service { service } = &plugin.spec.backend;
        assert_eq!(service.port, 80);
        assert_eq!(service.base_path, "/");
        assert_eq!(plugin.release(), None);
        assert!(plugin.spec.order.is_none());
        assert!(plugin.status.link.is_empty());
    }

    #[test]
    fn missing_enabled_decodes_as_false() {
        let mut object = test_plugin();
        object["spec"].as_object_mut().unwrap().remove("enabled");
        let plugin = decode_console_plugin(&object).unwrap();
        assert!(!plugin.spec.enabled);
    }

    #[test]
    fn missing_required_fields_are_named() {
        for (field, pointer_parent, key) in [
            ("spec.pluginName", "spec", "pluginName"),
            ("spec.entrypoint", "spec", "entrypoint"),
            ("spec.backend", "spec", "backend"),
        ] {
            let mut object = test_plugin();
            object[pointer_parent].as_object_mut().unwrap().remove(key);
            assert_eq!(decode_field(&object), field);
        }

        let mut object = test_plugin();
        object.as_object_mut().unwrap().remove("spec");
        assert_eq!(decode_field(&object), "spec");

        let mut object = test_plugin();
        object["spec"]["backend"].as_object_mut().unwrap().remove("type");
        assert_eq!(decode_field(&object), "spec.backend.type");

        let mut object = test_plugin();
        object["spec"]["backend"].as_object_mut().unwrap().remove("service");
        assert_eq!(decode_field(&object), "spec.backend.service");
    }

    #[test]
    fn unknown_entrypoint_is_rejected() {
        let object = PluginObject::new("p1").entrypoint("Footer").build();
        assert_eq!(decode_field(&object), "spec.entrypoint");
    }

    #[test]
    fn unknown_backend_type_is_rejected() {
        let mut object = test_plugin();
        object["spec"]["backend"]["type"] = json!("ConfigMap");
        assert_eq!(decode_field(&object), "spec.backend.type");
    }

    #[test]
    fn negative_order_is_carried_through() {
        let object = PluginObject::new("p1").order(-1).build();
        let plugin = decode_console_plugin(&object).unwrap();
        assert_eq!(plugin.spec.order, Some(-1));
    }

    #[test]
    fn fractional_order_names_the_field() {
        let mut object = test_plugin();
        object["spec"]["order"] = json!(1.5);
        assert_eq!(decode_field(&object), "spec.order");
    }

    #[test]
    fn wrong_type_names_the_field() {
        let mut object = test_plugin();
        object["spec"]["enabled"] = json!("yes");
        assert_eq!(decode_field(&object), "spec.enabled");

        let mut object = test_plugin();
        object["spec"]["subPages"] = json!("alerts");
        assert_eq!(decode_field(&object), "spec.subPages");

        let mut object = test_plugin();
        object["status"] = json!(["link"]);
        assert_eq!(decode_field(&object), "status");
    }

    #[test]
    fn explicit_nulls_read_as_defaults() {
        let mut object = PluginObject::new("p1").sub_page("a", "A").build();
        object["spec"]["subPages"] = Value::Null;
        object["spec"]["displayName"] = Value::Null;
        object["spec"]["order"] = Value::Null;
        object["spec"]["enabled"] = Value::Null;
        object["metadata"]["annotations"] = Value::Null;
        object["spec"]["backend"]["service"]["port"] = Value::Null;
        object["spec"]["backend"]["service"]["basePath"] = Value::Null;
        object["status"] = Value::Null;

        let plugin = decode_console_plugin(&object).unwrap();
        assert!(plugin.spec.sub_pages.is_empty());
        assert!(plugin.spec.display_name.is_empty());
        assert!(plugin.spec.order.is_none());
        assert!(!plugin.spec.enabled);
        assert_eq!(plugin.release(), None);
        assert!(plugin.status.link.is_empty());
        let ConsolePluginBackend::Service { service } = &plugin.spec.backend;
        assert_eq!(service.port, 80);
        assert_eq!(service.base_path, "/");
    }

    #[test]
    fn null_status_link_reads_as_empty() {
        let mut object = test_plugin();
        object["status"] = json!({ "link": null });
        let plugin = decode_console_plugin(&object).unwrap();
        assert!(plugin.status.link.is_empty());
    }

    #[test]
    fn decode_error_carries_object_name() {
        let object = PluginObject::new("broken").entrypoint("Footer").build();
        match decode_console_plugin(&object) {
            Err(PluginHubError::Decode { name, .. }) => assert_eq!(name, "broken"),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn enablement_patch_touches_only_enabled() {
        assert_eq!(
            encode_enablement_patch(true),
            json!({ "spec": { "enabled": true } })
        );
        assert_eq!(
            encode_enablement_patch(false).to_string(),
            r#"{"spec":{"enabled":false}}"#
        );
    }

    #[test]
    fn entrypoint_string_tags() {
        assert_eq!(Entrypoint::Nav.as_ref(), "Nav");
        assert_eq!(Entrypoint::Side.to_string(), "Side");
        assert!("nav".parse::<Entrypoint>().is_err());
    }
}
