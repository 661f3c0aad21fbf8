// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Last-known state of one agent window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status recorded for an agent.
///
/// The controller only ever writes [`AgentRecordStatus::Running`]; the record
/// goes stale once the process inside the window exits. Other values are
/// whatever an agent wrote back and are preserved as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentRecordStatus {
    Running,
    Other(String),
}

impl AgentRecordStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AgentRecordStatus::Running => "running",
            AgentRecordStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for AgentRecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AgentRecordStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "running" => AgentRecordStatus::Running,
            _ => AgentRecordStatus::Other(s),
        }
    }
}

impl From<AgentRecordStatus> for String {
    fn from(status: AgentRecordStatus) -> Self {
        match status {
            AgentRecordStatus::Running => "running".to_string(),
            AgentRecordStatus::Other(s) => s,
        }
    }
}

impl Serialize for AgentRecordStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgentRecordStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// One agent window as the ledger knows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub name: String,
    pub provider: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
    pub status: AgentRecordStatus,
}

impl AgentRecord {
    /// A freshly launched agent.
    pub fn running(
        name: impl Into<String>,
        provider: impl Into<String>,
        prompt: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            provider: provider.into(),
            prompt: prompt.into(),
            created_at,
            status: AgentRecordStatus::Running,
        }
    }
}
