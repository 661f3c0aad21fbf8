// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Global tmux session name → session id mapping.

use llmmux_core::SessionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat `{ "<tmux session name>": "<session id>" }` document.
///
/// Keys are unique; inserting an existing name replaces its id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionIndex(BTreeMap<String, SessionId>);

impl SessionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `name` at `id`, returning the id it previously mapped to.
    pub fn insert(&mut self, name: impl Into<String>, id: SessionId) -> Option<SessionId> {
        self.0.insert(name.into(), id)
    }

    pub fn get(&self, name: &str) -> Option<&SessionId> {
        self.0.get(name)
    }

    /// Whether any name maps to `id`.
    pub fn contains_id(&self, id: &SessionId) -> bool {
        self.0.values().any(|v| v == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SessionId)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
