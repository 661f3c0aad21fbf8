// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{AgentWindowManager, SessionManager};
use chrono::{TimeZone, Utc};
use llmmux_adapters::FakeSessionAdapter;
use llmmux_core::{FakeClock, SequentialIdGen};
use llmmux_storage::StateStore;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tempfile::TempDir;

pub(crate) type TestSessionManager = SessionManager<FakeSessionAdapter, FakeClock, SequentialIdGen>;
pub(crate) type TestAgentManager = AgentWindowManager<FakeSessionAdapter, FakeClock>;

/// Fresh home, fake tmux, pinned clock and sequential ids.
pub(crate) struct TestContext {
    _home: TempDir,
    pub store: StateStore,
    pub sessions: FakeSessionAdapter,
    pub clock: FakeClock,
    pub ids: SequentialIdGen,
    pub project_root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let home = tempfile::tempdir().unwrap();
        let store = StateStore::new(home.path().join("llmmux"));
        store.bootstrap().unwrap();
        let project_root = home.path().join("proj");
        std::fs::create_dir_all(&project_root).unwrap();
        Self {
            store,
            sessions: FakeSessionAdapter::new(),
            clock: FakeClock::new(Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap()),
            ids: SequentialIdGen::new(),
            project_root,
            _home: home,
        }
    }

    pub fn session_manager(&self) -> TestSessionManager {
        SessionManager::new(
            self.sessions.clone(),
            self.store.clone(),
            self.clock.clone(),
            self.ids.clone(),
        )
    }

    pub fn agent_manager(&self) -> TestAgentManager {
        AgentWindowManager::new(
            self.sessions.clone(),
            self.store.clone(),
            self.clock.clone(),
        )
    }
}

/// Variable source with the given entries and nothing else.
pub(crate) fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
