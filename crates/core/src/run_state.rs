// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session run state document.
//!
//! Agents running inside the session read and append to this document, so
//! fields the controller does not know about are carried through untouched.

use crate::agent_record::AgentRecord;
use crate::session::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Same value as the session id
    pub run_id: SessionId,
    pub timestamp: DateTime<Utc>,
    pub repo_root: PathBuf,
    pub tmux_session_name: String,
    pub provider: String,
    #[serde(default)]
    pub agents: BTreeMap<String, AgentRecord>,
    #[serde(default)]
    pub artifacts: Vec<serde_json::Value>,
    #[serde(default)]
    pub task_queue: Vec<serde_json::Value>,
    #[serde(default)]
    pub constraints: Vec<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RunState {
    /// Initial document for a newly created session.
    pub fn new(
        session_id: SessionId,
        tmux_session_name: impl Into<String>,
        repo_root: impl Into<PathBuf>,
        provider: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            run_id: session_id,
            timestamp,
            repo_root: repo_root.into(),
            tmux_session_name: tmux_session_name.into(),
            provider: provider.into(),
            agents: BTreeMap::new(),
            artifacts: Vec::new(),
            task_queue: Vec::new(),
            constraints: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Insert or replace the record keyed by its name. Later writes win.
    pub fn upsert_agent(&mut self, record: AgentRecord) -> Option<AgentRecord> {
        self.agents.insert(record.name.clone(), record)
    }
}

#[cfg(test)]
#[path = "run_state_tests.rs"]
mod tests;
