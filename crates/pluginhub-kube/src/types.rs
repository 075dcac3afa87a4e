// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for API server responses.

use serde::Deserialize;
use serde_json::Value;

/// A list response. Only `items` is read; list metadata is ignored.
#[derive(Debug, Deserialize)]
pub struct ObjectList {
    #[serde(default)]
    pub items: Vec<Value>,
}

/// The `Status` object returned with error responses.
#[derive(Debug, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}
