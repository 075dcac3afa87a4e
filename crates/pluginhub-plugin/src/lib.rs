// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ConsolePlugin registry access and enablement control.
//!
//! - [`model`]: typed record and decode from the store's untyped objects
//! - [`manager`]: list/get/check/set over an [`pluginhub_core::ObjectStore`]
//! - [`projection`]: the client-facing view

pub mod manager;
pub mod model;
pub mod projection;

pub use manager::{ConsolePluginManager, SetEnablementOutcome};
pub use model::{
    decode_console_plugin, encode_enablement_patch, ConsolePlugin, ConsolePluginBackend,
    ConsolePluginSpec, ConsolePluginStatus, Entrypoint, ObjectMeta, ServiceBackend, SubPage,
    RELEASE_ANNOTATION,
};
pub use projection::{ConsolePluginView, EnablementView};
