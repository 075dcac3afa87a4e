// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for pluginhub integration tests.
//!
//! Provides an in-memory object store and ConsolePlugin fixtures for fast,
//! deterministic tests without a cluster.
//!
//! # Components
//!
//! - [`MockObjectStore`] - In-memory store with merge patch, write counting and failure injection
//! - [`PluginObject`] - Builder for stored ConsolePlugin objects

pub mod fixtures;
pub mod mock_store;

pub use fixtures::{dummy_plugin, test_plugin, PluginObject, RELEASE_ANNOTATION};
pub use mock_store::{apply_merge_patch, InjectedFailure, MockObjectStore};
