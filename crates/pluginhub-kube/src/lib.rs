// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kubernetes API server implementation of the pluginhub object store.

pub mod client;
pub mod types;

pub use client::{resolve_api_server, KubeObjectStore, IN_CLUSTER_API_SERVER};
