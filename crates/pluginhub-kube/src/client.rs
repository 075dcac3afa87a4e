// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Object store backed by the Kubernetes API server.
//!
//! Talks plain REST to the cluster-scoped custom resource endpoints:
//! `GET /apis/{group}/{version}/{resource}`, `GET .../{name}` and
//! `PATCH .../{name}` with a JSON merge patch.

use async_trait::async_trait;
use pluginhub_config::model::StoreConfig;
use pluginhub_core::{GroupVersionResource, ObjectStore, PatchType, PluginHubError};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::types::{ObjectList, Status};

/// Fallback API server address inside a cluster.
pub const IN_CLUSTER_API_SERVER: &str = "https://kubernetes.default.svc";

/// Kubernetes-backed [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct KubeObjectStore {
    client: reqwest::Client,
    base_url: url::Url,
}

impl KubeObjectStore {
    /// Wrap an already configured HTTP client.
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self, PluginHubError> {
        let base_url = url::Url::parse(base_url)
            .map_err(|e| PluginHubError::Config(format!("invalid API server URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(PluginHubError::Config(format!(
                "API server URL `{base_url}` cannot be used as a base"
            )));
        }
        Ok(Self { client, base_url })
    }

    /// Build a store from configuration.
    ///
    /// Resolves the API server address, enforces HTTPS for remote hosts,
    /// and reads the service account token and CA bundle.
    pub fn from_config(config: &StoreConfig) -> Result<Self, PluginHubError> {
        let api_server = resolve_api_server(config);
        pluginhub_security::validate_url(&api_server)?;
        let token = pluginhub_security::read_bearer_token(&config.token_file)?;
        let client = pluginhub_security::build_store_client(config, token.as_deref())?;
        info!(
            api_server = %api_server,
            authenticated = token.is_some(),
            "object store client configured"
        );
        Self::new(client, &api_server)
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// URL of a collection, or of one object in it when `name` is given.
    ///
    /// Path segments are percent-encoded, so a name cannot escape its
    /// collection.
    pub fn resource_url(&self, gvr: &GroupVersionResource, name: Option<&str>) -> url::Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            if gvr.group.is_empty() {
                segments.push("api");
            } else {
                segments.extend(["apis", gvr.group.as_str()]);
            }
            segments.extend([gvr.version.as_str(), gvr.resource.as_str()]);
            if let Some(name) = name {
                segments.push(name);
            }
        }
        url
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        gvr: &GroupVersionResource,
        name: Option<&str>,
    ) -> Result<Value, PluginHubError> {
        let response = request
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| PluginHubError::unavailable(format!("request to API server failed: {e}"), e))?;

        let status = response.status();
        debug!(status = %status, resource = %gvr, "API server response received");

        if status.is_success() {
            return response.json::<Value>().await.map_err(|e| {
                PluginHubError::unavailable(format!("failed to parse API server response: {e}"), e)
            });
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_error_status(status, &body, gvr, name))
    }
}

#[async_trait]
impl ObjectStore for KubeObjectStore {
    fn name(&self) -> &str {
        "kubernetes"
    }

    async fn list(&self, gvr: &GroupVersionResource) -> Result<Vec<Value>, PluginHubError> {
        let url = self.resource_url(gvr, None);
        let body = self.send(self.client.get(url), gvr, None).await?;
        let list: ObjectList = serde_json::from_value(body).map_err(|e| {
            PluginHubError::unavailable(format!("malformed list response for {gvr}: {e}"), e)
        })?;
        Ok(list.items)
    }

    async fn get(&self, gvr: &GroupVersionResource, name: &str) -> Result<Value, PluginHubError> {
        let url = self.resource_url(gvr, Some(name));
        self.send(self.client.get(url), gvr, Some(name)).await
    }

    async fn patch_merge(
        &self,
        gvr: &GroupVersionResource,
        name: &str,
        patch: &Value,
    ) -> Result<Value, PluginHubError> {
        let url = self.resource_url(gvr, Some(name));
        let request = self
            .client
            .patch(url)
            .header(CONTENT_TYPE, PatchType::Merge.to_string())
            .body(patch.to_string());
        self.send(request, gvr, Some(name)).await
    }
}

/// Pick the API server address.
///
/// Order: `store.api_server`, then `KUBERNETES_SERVICE_HOST` with
/// `KUBERNETES_SERVICE_PORT` (default 443), then the in-cluster DNS name.
pub fn resolve_api_server(config: &StoreConfig) -> String {
    if let Some(api_server) = &config.api_server {
        return api_server.trim_end_matches('/').to_string();
    }
    match std::env::var("KUBERNETES_SERVICE_HOST") {
        Ok(host) if !host.is_empty() => {
            let port = std::env::var("KUBERNETES_SERVICE_PORT")
                .ok()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| "443".to_string());
            // IPv6 service hosts need brackets in a URL authority.
            if host.contains(':') {
                format!("https://[{host}]:{port}")
            } else {
                format!("https://{host}:{port}")
            }
        }
        _ => IN_CLUSTER_API_SERVER.to_string(),
    }
}

/// Translate a non-2xx API server response into the error taxonomy.
fn map_error_status(
    status: StatusCode,
    body: &str,
    gvr: &GroupVersionResource,
    name: Option<&str>,
) -> PluginHubError {
    let parsed = serde_json::from_str::<Status>(body).ok();
    let reason = parsed
        .as_ref()
        .and_then(|s| s.reason.clone())
        .unwrap_or_default();
    let message = parsed
        .and_then(|s| s.message)
        .unwrap_or_else(|| format!("API server returned {status}: {body}"));

    match (status, name) {
        (StatusCode::NOT_FOUND, Some(name)) => PluginHubError::NotFound {
            resource: gvr.resource.clone(),
            name: name.to_string(),
        },
        (StatusCode::CONFLICT, Some(name)) => PluginHubError::Conflict {
            name: name.to_string(),
            message,
        },
        _ => {
            warn!(status = %status, reason = %reason, resource = %gvr, "API server request failed");
            PluginHubError::StoreUnavailable {
                message,
                source: None,
            }
        }
    }
}
