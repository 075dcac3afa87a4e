// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the ConsolePlugin REST API.
//!
//! Handles GET /consoleplugins/, GET /consoleplugins/{pluginName},
//! GET and POST /consoleplugins/{pluginName}/enabled, and GET /health.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use pluginhub_plugin::{ConsolePluginView, EnablementView};
use pluginhub_security::sanitize_log_string;

use crate::envelope::{ApiResponse, ResponseJson, CLIENT_ERROR, RESOURCE_NOT_FOUND, SERVER_ERROR};
use crate::server::GatewayState;

/// Request body for POST /consoleplugins/{pluginName}/enabled.
///
/// Missing members take their zero values, so an absent `pluginName`
/// fails the identity check rather than the parse.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEnablementBody {
    #[serde(default)]
    pub plugin_name: String,
    #[serde(default)]
    pub enabled: bool,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /consoleplugins/
pub async fn list_console_plugins(State(state): State<GatewayState>) -> ApiResponse {
    match state.manager.list().await {
        Ok(plugins) => {
            let views: Vec<ConsolePluginView> = plugins.iter().map(ConsolePluginView::from).collect();
            ResponseJson::success(&views)
        }
        Err(e) => {
            let e = sanitize_log_string(&e.to_string());
            error!("Error listing ConsolePlugins: {e}");
            ResponseJson::error(
                StatusCode::NOT_FOUND,
                RESOURCE_NOT_FOUND,
                format!("Error listing ConsolePlugins: {e}"),
            )
        }
    }
}

/// GET /consoleplugins/{pluginName}
pub async fn get_console_plugin(
    State(state): State<GatewayState>,
    Path(plugin_name): Path<String>,
) -> ApiResponse {
    match state.manager.get(&plugin_name).await {
        Ok(plugin) => ResponseJson::success(&ConsolePluginView::from(&plugin)),
        Err(e) => {
            let e = sanitize_log_string(&e.to_string());
            error!("Error getting ConsolePlugin: {e}");
            ResponseJson::error(
                StatusCode::NOT_FOUND,
                RESOURCE_NOT_FOUND,
                format!("Error getting ConsolePlugin: {e}"),
            )
        }
    }
}

/// GET /consoleplugins/{pluginName}/enabled
pub async fn check_enablement(
    State(state): State<GatewayState>,
    Path(plugin_name): Path<String>,
) -> ApiResponse {
    match state.manager.check_enablement(&plugin_name).await {
        Ok(enabled) => ResponseJson::success(&EnablementView {
            plugin_name,
            enabled,
        }),
        Err(e) => {
            let e = sanitize_log_string(&e.to_string());
            error!("Error checking ConsolePlugin enablement: {e}");
            ResponseJson::error(
                StatusCode::NOT_FOUND,
                RESOURCE_NOT_FOUND,
                format!("Error checking ConsolePlugin enablement: {e}"),
            )
        }
    }
}

/// POST /consoleplugins/{pluginName}/enabled
///
/// The body must name the same plugin as the path; a mismatch is rejected
/// before the store is touched.
pub async fn set_enablement(
    State(state): State<GatewayState>,
    Path(plugin_name): Path<String>,
    body: Bytes,
) -> ApiResponse {
    let body: SetEnablementBody = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(e) => {
            error!("Error parsing request body: {e}");
            return ResponseJson::error(
                StatusCode::BAD_REQUEST,
                CLIENT_ERROR,
                format!("Error parsing request body: {e}"),
            );
        }
    };

    let path_name = sanitize_log_string(&plugin_name);
    if plugin_name != body.plugin_name {
        let body_name = sanitize_log_string(&body.plugin_name);
        error!("PluginName not match: {path_name}, {body_name}");
        return ResponseJson::error(
            StatusCode::BAD_REQUEST,
            CLIENT_ERROR,
            format!("PluginName not match: {path_name}, {body_name}"),
        );
    }

    let enabled = body.enabled;
    match state.manager.set_enablement(&plugin_name, enabled).await {
        Ok(_) => {
            info!("Successfully set ConsolePlugin {path_name} enablement to {enabled}");
            ResponseJson::ok_message(format!(
                "Set ConsolePlugin {path_name} enablement to {enabled}"
            ))
        }
        Err(e) => {
            let e = sanitize_log_string(&e.to_string());
            error!("Error setting ConsolePlugin enablement: {e}");
            ResponseJson::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                SERVER_ERROR,
                format!("Fail to set the ConsolePlugin enablement: {e}"),
            )
        }
    }
}

/// GET /health
///
/// Unauthenticated liveness check. Does not contact the object store.
pub async fn get_health(State(state): State<GatewayState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
