// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory object store for deterministic testing.
//!
//! `MockObjectStore` implements `ObjectStore` over insertion-ordered
//! collections, applies RFC 7386 merge patches, counts writes, and can be
//! told to fail the next list or patch call.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use pluginhub_core::{GroupVersionResource, ObjectStore, PluginHubError};

/// A failure the mock store can be told to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFailure {
    /// Return `StoreUnavailable`.
    Unavailable,
    /// Return `Conflict`.
    Conflict,
    /// Delete the object, then return `NotFound` (deletion racing a write).
    Vanish,
}

#[derive(Default)]
struct State {
    collections: HashMap<GroupVersionResource, Vec<Value>>,
    patches: Vec<(String, Value)>,
    gets: usize,
    fail_list: Option<InjectedFailure>,
    fail_patch: Option<InjectedFailure>,
}

/// An in-memory object store for testing.
///
/// Objects are keyed by `metadata.name` and returned by `list()` in the
/// order they were inserted.
pub struct MockObjectStore {
    state: Mutex<State>,
}

impl MockObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    /// Create a store holding `objects` in the ConsolePlugin collection.
    pub fn with_plugins(objects: Vec<Value>) -> Self {
        let mut state = State::default();
        state
            .collections
            .insert(GroupVersionResource::console_plugins(), objects);
        Self {
            state: Mutex::new(state),
        }
    }

    /// Insert or replace an object in the given collection.
    pub async fn insert(&self, gvr: &GroupVersionResource, object: Value) {
        let mut state = self.state.lock().await;
        let items = state.collections.entry(gvr.clone()).or_default();
        let name = object_name(&object).to_string();
        match items.iter_mut().find(|o| object_name(o) == name) {
            Some(existing) => *existing = object,
            None => items.push(object),
        }
    }

    /// Return a copy of the stored ConsolePlugin object named `name`.
    pub async fn plugin(&self, name: &str) -> Option<Value> {
        let state = self.state.lock().await;
        state
            .collections
            .get(&GroupVersionResource::console_plugins())
            .and_then(|items| items.iter().find(|o| object_name(o) == name))
            .cloned()
    }

    /// Number of patches that were applied or attempted.
    pub async fn patch_count(&self) -> usize {
        self.state.lock().await.patches.len()
    }

    /// All patches received, in order, as (name, patch) pairs.
    pub async fn patches(&self) -> Vec<(String, Value)> {
        self.state.lock().await.patches.clone()
    }

    /// Number of get calls served.
    pub async fn get_count(&self) -> usize {
        self.state.lock().await.gets
    }

    /// Make the next `list()` call fail.
    pub async fn fail_next_list(&self, failure: InjectedFailure) {
        self.state.lock().await.fail_list = Some(failure);
    }

    /// Make the next `patch_merge()` call fail.
    pub async fn fail_next_patch(&self, failure: InjectedFailure) {
        self.state.lock().await.fail_patch = Some(failure);
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    fn name(&self) -> &str {
        "mock-store"
    }

    async fn list(&self, gvr: &GroupVersionResource) -> Result<Vec<Value>, PluginHubError> {
        let mut state = self.state.lock().await;
        if let Some(failure) = state.fail_list.take() {
            return Err(injected_error(failure, &gvr.resource));
        }
        Ok(state.collections.get(gvr).cloned().unwrap_or_default())
    }

    async fn get(&self, gvr: &GroupVersionResource, name: &str) -> Result<Value, PluginHubError> {
        let mut state = self.state.lock().await;
        state.gets += 1;
        state
            .collections
            .get(gvr)
            .and_then(|items| items.iter().find(|o| object_name(o) == name))
            .cloned()
            .ok_or_else(|| not_found(gvr, name))
    }

    async fn patch_merge(
        &self,
        gvr: &GroupVersionResource,
        name: &str,
        patch: &Value,
    ) -> Result<Value, PluginHubError> {
        let mut state = self.state.lock().await;
        state.patches.push((name.to_string(), patch.clone()));

        match state.fail_patch.take() {
            Some(InjectedFailure::Vanish) => {
                if let Some(items) = state.collections.get_mut(gvr) {
                    items.retain(|o| object_name(o) != name);
                }
            }
            Some(failure) => return Err(injected_error(failure, name)),
            None => {}
        }

        let object = state
            .collections
            .get_mut(gvr)
            .and_then(|items| items.iter_mut().find(|o| object_name(o) == name))
            .ok_or_else(|| not_found(gvr, name))?;
        apply_merge_patch(object, patch);
        tracing::debug!(name, "mock store applied merge patch");
        Ok(object.clone())
    }
}

/// Apply an RFC 7386 JSON merge patch to `target` in place.
///
/// `null` members delete the key; objects merge recursively; every other
/// value replaces the target wholesale.
pub fn apply_merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch_map) = patch else {
        *target = patch.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(target_map) = target {
        for (key, value) in patch_map {
            if value.is_null() {
                target_map.remove(key);
            } else {
                apply_merge_patch(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}

fn object_name(object: &Value) -> &str {
    object
        .pointer("/metadata/name")
        .and_then(Value::as_str)
        .unwrap_or("")
}

fn not_found(gvr: &GroupVersionResource, name: &str) -> PluginHubError {
    PluginHubError::NotFound {
        resource: gvr.resource.clone(),
        name: name.to_string(),
    }
}

fn injected_error(failure: InjectedFailure, name: &str) -> PluginHubError {
    match failure {
        InjectedFailure::Unavailable => PluginHubError::StoreUnavailable {
            message: "injected failure: connection refused".to_string(),
            source: None,
        },
        InjectedFailure::Conflict => PluginHubError::Conflict {
            name: name.to_string(),
            message: "injected failure: object has been modified".to_string(),
        },
        InjectedFailure::Vanish => PluginHubError::NotFound {
            resource: "consoleplugins".to_string(),
            name: name.to_string(),
        },
    }
}
