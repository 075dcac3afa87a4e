// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for pluginhub.
//!
//! This crate provides the error type, the object store trait, and the
//! shared types used throughout the pluginhub workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PluginHubError;
pub use traits::ObjectStore;
pub use types::{GroupVersionResource, PatchType};
