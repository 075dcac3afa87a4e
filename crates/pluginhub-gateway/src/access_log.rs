// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access log middleware.
//!
//! One record per request, after the response is produced. Statuses up to
//! 400 log at info; anything above logs at warn.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::HttpBody,
    extract::{ConnectInfo, Request},
    http::{header::CONTENT_LENGTH, StatusCode},
    middleware::Next,
    response::Response,
};
use pluginhub_security::sanitize_log_string;
use tracing::{info, warn};

/// Log method, peer address, URI, protocol, status, length and latency.
pub async fn access_log(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = sanitize_log_string(&request.uri().to_string());
    let version = request.version();
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    let response = next.run(request).await;

    let status = response.status();
    let length = response_length(&response);
    let duration_ms = start.elapsed().as_millis() as u64;

    if is_warn_status(status) {
        warn!(
            method = %method,
            address = %remote,
            url = %uri,
            proto = ?version,
            status = status.as_u16(),
            length,
            duration_ms,
            "HTTP request details"
        );
    } else {
        info!(
            method = %method,
            address = %remote,
            url = %uri,
            proto = ?version,
            status = status.as_u16(),
            length,
            duration_ms,
            "HTTP request details"
        );
    }

    response
}

/// Statuses above 400 are logged as warnings; 400 itself is not.
pub fn is_warn_status(status: StatusCode) -> bool {
    status.as_u16() > StatusCode::BAD_REQUEST.as_u16()
}

/// Body length from `Content-Length`, else the body's exact size hint, else -1.
fn response_length(response: &Response) -> i64 {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .or_else(|| {
            response
                .body()
                .size_hint()
                .exact()
                .and_then(|n| i64::try_from(n).ok())
        })
        .unwrap_or(-1)
}
