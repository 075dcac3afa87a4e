// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the collaborators pluginhub depends on.
//!
//! Traits use `#[async_trait]` so implementations can be held as
//! `Arc<dyn ObjectStore>`.

pub mod object_store;

pub use object_store::ObjectStore;
