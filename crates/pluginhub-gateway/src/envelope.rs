// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `{code, msg, data}` response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

/// Envelope code for a successful call.
pub const SUCCESS: i32 = 200;
/// Envelope code for a malformed request.
pub const CLIENT_ERROR: i32 = 400;
/// Envelope code for a missing resource.
pub const RESOURCE_NOT_FOUND: i32 = 404;
/// Envelope code for a failed write or internal fault.
pub const SERVER_ERROR: i32 = 500;

/// Body of every API response. `data` is omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseJson {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResponseJson {
    /// A 200 envelope with `msg` "success" carrying `data`.
    ///
    /// A value that fails to serialize becomes a 500 envelope.
    pub fn success<T: Serialize>(data: &T) -> ApiResponse {
        match serde_json::to_value(data) {
            Ok(data) => ApiResponse::new(
                StatusCode::OK,
                Self {
                    code: SUCCESS,
                    msg: "success".to_string(),
                    data: Some(data),
                },
            ),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize response data");
                Self::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR,
                    format!("failed to serialize response: {e}"),
                )
            }
        }
    }

    /// A 200 envelope with a message and no data.
    pub fn ok_message(msg: impl Into<String>) -> ApiResponse {
        ApiResponse::new(
            StatusCode::OK,
            Self {
                code: SUCCESS,
                msg: msg.into(),
                data: None,
            },
        )
    }

    /// An error envelope sent with the given HTTP status.
    pub fn error(status: StatusCode, code: i32, msg: impl Into<String>) -> ApiResponse {
        ApiResponse::new(
            status,
            Self {
                code,
                msg: msg.into(),
                data: None,
            },
        )
    }
}

/// An envelope paired with the HTTP status it is sent with.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ResponseJson,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: ResponseJson) -> Self {
        Self { status, body }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
