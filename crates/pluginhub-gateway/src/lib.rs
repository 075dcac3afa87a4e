// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST gateway for pluginhub.
//!
//! Exposes ConsolePlugin listing, lookup and enablement control under a
//! configurable API root, wraps every answer in the `{code, msg, data}`
//! envelope, and writes one access log record per request. Serves HTTPS
//! when TLS is enabled.

pub mod access_log;
pub mod envelope;
pub mod handlers;
pub mod server;
pub mod tls_listener;

pub use envelope::{ApiResponse, ResponseJson};
pub use server::{inbound_tls, router, start_server, GatewayState};
pub use tls_listener::TlsListener;
