// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Security helpers for pluginhub.
//!
//! Provides log-injection sanitizing for caller-supplied strings and the
//! TLS-enforcing HTTP client used to reach the object store, plus the
//! rustls configuration for the inbound HTTPS listener.

pub mod sanitize;
pub mod server_tls;
pub mod tls;

pub use sanitize::sanitize_log_string;
pub use server_tls::build_server_tls_config;
pub use tls::{build_store_client, is_localhost, read_bearer_token, validate_url};
