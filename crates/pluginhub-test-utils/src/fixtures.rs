// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stored ConsolePlugin objects for tests.

use serde_json::{json, Map, Value};

/// Annotation a packaging tool attaches to record the owning release.
pub const RELEASE_ANNOTATION: &str = "meta.helm.sh/release-name";

/// Builder for a stored ConsolePlugin object in its untyped form.
///
/// The object name always equals `spec.pluginName`.
#[derive(Debug, Clone)]
pub struct PluginObject {
    name: String,
    display_name: String,
    entrypoint: String,
    enabled: bool,
    order: Option<i64>,
    sub_pages: Vec<(String, String)>,
    release: Option<String>,
    link: Option<String>,
    port: Option<i64>,
}

impl PluginObject {
    /// Start a Nav plugin named `name`, disabled, with a Service backend.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: format!("{name} display"),
            entrypoint: "Nav".to_string(),
            enabled: false,
            order: None,
            sub_pages: Vec::new(),
            release: None,
            link: None,
            port: None,
        }
    }

    pub fn display_name(mut self, display_name: &str) -> Self {
        self.display_name = display_name.to_string();
        self
    }

    pub fn entrypoint(mut self, entrypoint: &str) -> Self {
        self.entrypoint = entrypoint.to_string();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn sub_page(mut self, page_name: &str, display_name: &str) -> Self {
        self.sub_pages
            .push((page_name.to_string(), display_name.to_string()));
        self
    }

    pub fn release(mut self, release: &str) -> Self {
        self.release = Some(release.to_string());
        self
    }

    pub fn link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    pub fn port(mut self, port: i64) -> Self {
        self.port = Some(port);
        self
    }

    /// Produce the untyped object as the store would hold it.
    pub fn build(self) -> Value {
        let mut metadata = Map::new();
        metadata.insert("name".into(), json!(self.name));
        if let Some(release) = &self.release {
            metadata.insert(
                "annotations".into(),
                json!({ RELEASE_ANNOTATION: release }),
            );
        }

        let mut service = Map::new();
        service.insert("name".into(), json!(format!("{}-svc", self.name)));
        service.insert("namespace".into(), json!(format!("{}-ns", self.name)));
        if let Some(port) = self.port {
            service.insert("port".into(), json!(port));
        }

        let mut spec = Map::new();
        spec.insert("pluginName".into(), json!(self.name));
        spec.insert("displayName".into(), json!(self.display_name));
        spec.insert("entrypoint".into(), json!(self.entrypoint));
        spec.insert(
            "backend".into(),
            json!({ "type": "Service", "service": Value::Object(service) }),
        );
        spec.insert("enabled".into(), json!(self.enabled));
        if let Some(order) = self.order {
            spec.insert("order".into(), json!(order));
        }
        if !self.sub_pages.is_empty() {
            let pages: Vec<Value> = self
                .sub_pages
                .iter()
                .map(|(page, display)| json!({ "pageName": page, "displayName": display }))
                .collect();
            spec.insert("subPages".into(), Value::Array(pages));
        }

        let mut object = Map::new();
        object.insert("apiVersion".into(), json!("console.openfuyao.com/v1beta1"));
        object.insert("kind".into(), json!("ConsolePlugin"));
        object.insert("metadata".into(), Value::Object(metadata));
        object.insert("spec".into(), Value::Object(spec));
        if let Some(link) = self.link {
            object.insert("status".into(), json!({ "link": link }));
        }
        Value::Object(object)
    }
}

/// An enabled plugin carrying a release annotation.
pub fn test_plugin() -> Value {
    PluginObject::new("test")
        .display_name("Test Plugin")
        .enabled(true)
        .release("test-release")
        .build()
}

/// A disabled plugin without a release annotation.
pub fn dummy_plugin() -> Value {
    PluginObject::new("dummy")
        .display_name("Dummy Plugin")
        .entrypoint("Side")
        .enabled(false)
        .build()
}
