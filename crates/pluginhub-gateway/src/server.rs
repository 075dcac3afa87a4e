// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::serve::ListenerExt;
use axum::{middleware as axum_middleware, routing::get, Router};
use pluginhub_config::model::ServerConfig;
use pluginhub_core::PluginHubError;
use pluginhub_plugin::ConsolePluginManager;
use pluginhub_security::build_server_tls_config;
use tokio_rustls::rustls::ServerConfig as TlsServerConfig;
use tokio_util::sync::CancellationToken;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::Level;

use crate::access_log::access_log;
use crate::handlers;
use crate::tls_listener::TlsListener;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Registry manager all plugin routes go through.
    pub manager: ConsolePluginManager,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(manager: ConsolePluginManager) -> Self {
        Self {
            manager,
            start_time: Instant::now(),
        }
    }
}

/// Build the application router.
///
/// Plugin routes are mounted under `api_root`; `/health` stays at the root.
/// Every route passes through the access log.
pub fn router(api_root: &str, state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/consoleplugins", get(handlers::list_console_plugins))
        .route("/consoleplugins/", get(handlers::list_console_plugins))
        .route("/consoleplugins/{pluginName}", get(handlers::get_console_plugin))
        .route(
            "/consoleplugins/{pluginName}/enabled",
            get(handlers::check_enablement).post(handlers::set_enablement),
        )
        .with_state(state);

    let api_root = api_root.trim_end_matches('/');
    let mounted = if api_root.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_root, api_routes)
    };

    Router::new()
        .merge(public_routes)
        .merge(mounted)
        .layer(axum_middleware::from_fn(access_log))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
}

/// Start the gateway HTTP server.
///
/// Serves HTTPS when TLS is enabled and the certificate file exists,
/// plain HTTP otherwise. Runs until `shutdown` is cancelled, then drains
/// in-flight requests.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), PluginHubError> {
    let tls = inbound_tls(config)?;
    let app = router(&config.api_root, state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PluginHubError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;
    let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
    let stopped = async move { shutdown.cancelled().await };

    let served = match tls {
        Some(tls_config) => {
            let listener = TlsListener::new(listener, tls_config)
                .map_err(|e| PluginHubError::Internal(format!("failed to start TLS listener: {e}")))?;
            tracing::info!(api_root = %config.api_root, "gateway server listening on https://{addr}");
            axum::serve(listener.tap_io(|_| {}), make_service)
                .with_graceful_shutdown(stopped)
                .await
        }
        None => {
            tracing::info!(api_root = %config.api_root, "gateway server listening on http://{addr}");
            axum::serve(listener, make_service)
                .with_graceful_shutdown(stopped)
                .await
        }
    };
    served.map_err(|e| PluginHubError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("gateway server stopped");
    Ok(())
}

/// Resolve the inbound TLS configuration, if HTTPS should be served.
///
/// A missing certificate file keeps plain HTTP; a certificate that exists
/// alongside an unreadable key or CA bundle is a startup error.
pub fn inbound_tls(config: &ServerConfig) -> Result<Option<Arc<TlsServerConfig>>, PluginHubError> {
    if !config.enable_tls {
        return Ok(None);
    }
    let cert = Path::new(&config.tls_cert_file);
    if !cert.exists() {
        tracing::warn!(path = %cert.display(), "TLS enabled but certificate file not found, serving plain HTTP");
        return Ok(None);
    }
    build_server_tls_config(
        cert,
        Path::new(&config.tls_key_file),
        Path::new(&config.tls_ca_file),
    )
    .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pluginhub_test_utils::MockObjectStore;

    fn state() -> GatewayState {
        GatewayState::new(ConsolePluginManager::new(Arc::new(MockObjectStore::new())))
    }

    #[test]
    fn gateway_state_is_clone() {
        let _cloned = state().clone();
    }

    #[test]
    fn router_accepts_root_mount() {
        let _ = router("/", state());
        let _ = router("/rest/plugin-management/v1beta1", state());
    }

    #[tokio::test]
    async fn server_stops_on_cancel() {
        let config = ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 0,
            ..ServerConfig::default()
        };
        let shutdown = CancellationToken::new();
        shutdown.cancel();
        start_server(&config, state(), shutdown).await.unwrap();
    }

    #[test]
    fn tls_disabled_serves_plain_http() {
        assert!(inbound_tls(&ServerConfig::default()).unwrap().is_none());
    }

    #[test]
    fn missing_certificate_falls_back_to_plain_http() {
        let config = ServerConfig {
            enable_tls: true,
            tls_cert_file: "/nonexistent/server.crt".to_string(),
            ..ServerConfig::default()
        };
        assert!(inbound_tls(&config).unwrap().is_none());
    }

    #[test]
    fn unreadable_ca_bundle_fails_startup() {
        let fixtures = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/tls");
        let config = ServerConfig {
            enable_tls: true,
            tls_cert_file: format!("{fixtures}/server.crt"),
            tls_key_file: format!("{fixtures}/server.key"),
            tls_ca_file: "/nonexistent/ca.pem".to_string(),
            ..ServerConfig::default()
        };
        assert!(inbound_tls(&config).is_err());
    }
}
