// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: HTTP requests through the router into the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use pluginhub_gateway::{router, GatewayState};
use pluginhub_plugin::ConsolePluginManager;
use pluginhub_test_utils::{dummy_plugin, test_plugin, InjectedFailure, MockObjectStore, PluginObject};
use serde_json::{json, Value};
use tower::ServiceExt;

const API_ROOT: &str = "/rest/plugin-management/v1beta1";

fn app(store: &Arc<MockObjectStore>) -> Router {
    let manager = ConsolePluginManager::new(store.clone());
    router(API_ROOT, GatewayState::new(manager))
}

async fn call(app: Router, method: Method, path: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(format!("{API_ROOT}{path}"))
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn scenario_a_check_disabled_plugin() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![PluginObject::new("p1").build()]));

    let (status, body) = call(app(&store), Method::GET, "/consoleplugins/p1/enabled", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"code": 200, "msg": "success", "data": {"pluginName": "p1", "enabled": false}})
    );
}

#[tokio::test]
async fn scenario_b_enable_then_read_back() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![PluginObject::new("p1").build()]));

    let (status, body) = call(
        app(&store),
        Method::POST,
        "/consoleplugins/p1/enabled",
        Some(r#"{"pluginName":"p1","enabled":true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"code": 200, "msg": "Set ConsolePlugin p1 enablement to true"})
    );

    let (_, body) = call(app(&store), Method::GET, "/consoleplugins/p1/enabled", None).await;
    assert_eq!(body["data"]["enabled"], true);
    assert_eq!(store.patch_count().await, 1);
}

#[tokio::test]
async fn scenario_c_name_mismatch_is_rejected_without_write() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![PluginObject::new("p1").build()]));

    let (status, body) = call(
        app(&store),
        Method::POST,
        "/consoleplugins/p1/enabled",
        Some(r#"{"pluginName":"p2","enabled":true}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert_eq!(body["msg"], "PluginName not match: p1, p2");
    assert_eq!(store.patch_count().await, 0);
    assert_eq!(store.get_count().await, 0);
}

#[tokio::test]
async fn scenario_d_missing_plugin_is_404() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![test_plugin()]));

    let (status, body) = call(app(&store), Method::GET, "/consoleplugins/nonexistent", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    let msg = body["msg"].as_str().unwrap();
    assert!(msg.starts_with("Error getting ConsolePlugin: "));
    assert!(msg.contains("nonexistent"));
}

#[tokio::test]
async fn listing_keeps_store_order_and_release() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![dummy_plugin(), test_plugin()]));

    let (status, body) = call(app(&store), Method::GET, "/consoleplugins/", None).await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["pluginName"], "dummy");
    assert_eq!(data[0]["release"], "");
    assert_eq!(data[0]["entrypoint"], "Side");
    assert_eq!(data[1]["pluginName"], "test");
    assert_eq!(data[1]["release"], "test-release");
    assert_eq!(data[1]["displayName"], "Test Plugin");
}

#[tokio::test]
async fn listing_without_trailing_slash() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![test_plugin()]));
    let (status, body) = call(app(&store), Method::GET, "/consoleplugins", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn empty_listing_is_empty_array() {
    let store = Arc::new(MockObjectStore::new());
    let (status, body) = call(app(&store), Method::GET, "/consoleplugins/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn list_outage_maps_to_404() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![test_plugin()]));
    store.fail_next_list(InjectedFailure::Unavailable).await;

    let (status, body) = call(app(&store), Method::GET, "/consoleplugins/", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert!(body["msg"]
        .as_str()
        .unwrap()
        .starts_with("Error listing ConsolePlugins: "));
}

#[tokio::test]
async fn list_error_message_strips_control_characters() {
    let forged = PluginObject::new("bad\n[INFO] forged").entrypoint("Footer").build();
    let store = Arc::new(MockObjectStore::with_plugins(vec![test_plugin(), forged]));

    let (status, body) = call(app(&store), Method::GET, "/consoleplugins/", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let msg = body["msg"].as_str().unwrap();
    assert!(msg.contains("bad[INFO] forged"));
    assert!(!msg.contains('\n'));
}

#[tokio::test]
async fn listing_includes_negative_order() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![
        test_plugin(),
        PluginObject::new("neg").order(-1).build(),
    ]));

    let (status, body) = call(app(&store), Method::GET, "/consoleplugins/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][1]["order"], "-1");
}

#[tokio::test]
async fn get_projects_record() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![PluginObject::new("p1")
        .order(2)
        .link("/proxy/p1")
        .build()]));

    let (status, body) = call(app(&store), Method::GET, "/consoleplugins/p1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order"], "2");
    assert_eq!(body["data"]["url"], "/proxy/p1");
    assert_eq!(body["data"]["subPages"], json!([]));
}

#[tokio::test]
async fn get_without_order_omits_key() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![PluginObject::new("p1").build()]));
    let (_, body) = call(app(&store), Method::GET, "/consoleplugins/p1", None).await;
    assert!(body["data"].as_object().unwrap().get("order").is_none());
}

#[tokio::test]
async fn undecodable_record_is_404() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![PluginObject::new("p1")
        .entrypoint("Footer")
        .build()]));
    let (status, _) = call(app(&store), Method::GET, "/consoleplugins/p1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn check_missing_plugin_is_404() {
    let store = Arc::new(MockObjectStore::new());
    let (status, body) = call(app(&store), Method::GET, "/consoleplugins/ghost/enabled", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["msg"]
        .as_str()
        .unwrap()
        .starts_with("Error checking ConsolePlugin enablement: "));
}

#[tokio::test]
async fn malformed_body_is_400() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![PluginObject::new("p1").build()]));

    let (status, body) = call(
        app(&store),
        Method::POST,
        "/consoleplugins/p1/enabled",
        Some("{not json"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["msg"]
        .as_str()
        .unwrap()
        .starts_with("Error parsing request body: "));
    assert_eq!(store.patch_count().await, 0);
}

#[tokio::test]
async fn mismatch_message_strips_control_characters() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![PluginObject::new("p1").build()]));

    let (status, body) = call(
        app(&store),
        Method::POST,
        "/consoleplugins/p1/enabled",
        Some(r#"{"pluginName":"p2\n[INFO] forged","enabled":true}"#),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "PluginName not match: p1, p2[INFO] forged");
}

#[tokio::test]
async fn set_on_missing_plugin_is_500() {
    let store = Arc::new(MockObjectStore::new());

    let (status, body) = call(
        app(&store),
        Method::POST,
        "/consoleplugins/ghost/enabled",
        Some(r#"{"pluginName":"ghost","enabled":true}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert!(body["msg"]
        .as_str()
        .unwrap()
        .starts_with("Fail to set the ConsolePlugin enablement: "));
}

#[tokio::test]
async fn set_write_failure_is_500() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![PluginObject::new("p1").build()]));
    store.fail_next_patch(InjectedFailure::Conflict).await;

    let (status, _) = call(
        app(&store),
        Method::POST,
        "/consoleplugins/p1/enabled",
        Some(r#"{"pluginName":"p1","enabled":true}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn repeated_post_writes_once() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![PluginObject::new("p1").build()]));
    let body = r#"{"pluginName":"p1","enabled":true}"#;

    for _ in 0..2 {
        let (status, _) = call(app(&store), Method::POST, "/consoleplugins/p1/enabled", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(store.patch_count().await, 1);
}

#[tokio::test]
async fn health_is_outside_api_root() {
    let store = Arc::new(MockObjectStore::new());
    let response = app(&store)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn routes_outside_api_root_are_not_served() {
    let store = Arc::new(MockObjectStore::with_plugins(vec![test_plugin()]));
    let response = app(&store)
        .oneshot(Request::builder().uri("/consoleplugins/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
