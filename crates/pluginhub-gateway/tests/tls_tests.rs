// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTPS listener tests against the certificates in `tests/fixtures/tls`.

use std::net::SocketAddr;
use std::sync::Arc;

use pluginhub_config::model::ServerConfig;
use pluginhub_gateway::{inbound_tls, router, GatewayState, TlsListener};
use pluginhub_plugin::ConsolePluginManager;
use pluginhub_test_utils::{dummy_plugin, MockObjectStore};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

const API_ROOT: &str = "/rest/plugin-management/v1beta1";
const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/tls");

fn tls_config() -> ServerConfig {
    ServerConfig {
        bind_address: "127.0.0.1".to_string(),
        port: 0,
        enable_tls: true,
        tls_cert_file: format!("{FIXTURES}/server.crt"),
        tls_key_file: format!("{FIXTURES}/server.key"),
        tls_ca_file: format!("{FIXTURES}/ca.pem"),
        ..ServerConfig::default()
    }
}

/// Serve the router over TLS on an ephemeral port.
async fn serve_tls(shutdown: CancellationToken) -> SocketAddr {
    let tls = inbound_tls(&tls_config()).unwrap().expect("TLS config");
    let tcp = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let listener = TlsListener::new(tcp, tls).unwrap();
    let addr = axum::serve::Listener::local_addr(&listener).unwrap();

    let store = Arc::new(MockObjectStore::with_plugins(vec![dummy_plugin()]));
    let app = router(API_ROOT, GatewayState::new(ConsolePluginManager::new(store)));
    tokio::spawn(async move {
        axum::serve(axum::serve::ListenerExt::tap_io(listener, |_| {}), app.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .unwrap();
    });
    addr
}

fn client_trusting_fixture_ca() -> reqwest::Client {
    let ca = std::fs::read(format!("{FIXTURES}/ca.pem")).unwrap();
    reqwest::Client::builder()
        .add_root_certificate(reqwest::Certificate::from_pem(&ca).unwrap())
        .build()
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn serves_listing_over_https() {
    let shutdown = CancellationToken::new();
    let addr = serve_tls(shutdown.clone()).await;

    let url = format!("https://localhost:{}{API_ROOT}/consoleplugins", addr.port());
    let response = client_trusting_fixture_ca().get(url).send().await.unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"][0]["pluginName"], "dummy");
    shutdown.cancel();
}

#[tokio::test(flavor = "multi_thread")]
async fn health_is_reachable_over_https() {
    let shutdown = CancellationToken::new();
    let addr = serve_tls(shutdown.clone()).await;

    let url = format!("https://localhost:{}/health", addr.port());
    let response = client_trusting_fixture_ca().get(url).send().await.unwrap();

    assert_eq!(response.status(), 200);
    shutdown.cancel();
}

#[tokio::test(flavor = "multi_thread")]
async fn plain_http_client_gets_no_response() {
    let shutdown = CancellationToken::new();
    let addr = serve_tls(shutdown.clone()).await;

    let url = format!("http://localhost:{}/health", addr.port());
    let result = reqwest::Client::new().get(url).send().await;

    assert!(result.is_err());
    shutdown.cancel();
}

#[tokio::test(flavor = "multi_thread")]
async fn untrusted_server_certificate_is_refused_by_client() {
    let shutdown = CancellationToken::new();
    let addr = serve_tls(shutdown.clone()).await;

    let url = format!("https://localhost:{}/health", addr.port());
    let result = reqwest::Client::new().get(url).send().await;

    assert!(result.is_err());
    shutdown.cancel();
}
