// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The llmmux home directory.
//!
//! ```text
//! <home>/
//!   .default_env  .env  INIT_ORCHESTRATOR.md  INIT_AGENT.md
//!   logs/llmmux.log
//!   state/session_index.json
//!   state/<session id>/{run_state.json, agents/, logs/}
//!   artifacts/<session id>/{patches/, reports/}
//! ```

use crate::document::{self, Revision, Versioned};
use crate::env_file;
use crate::index::SessionIndex;
use crate::StoreError;
use llmmux_core::{AgentRecord, LayeredVars, ProcessVars, RunState, SessionId};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How many times a read-modify-write is re-applied after a revision
/// conflict before the conflict is returned.
pub const MAX_UPDATE_ATTEMPTS: u32 = 3;

const DEFAULT_ENV: &str = ".default_env";
const USER_ENV: &str = ".env";
const ORCHESTRATOR_DESCRIPTOR: &str = "INIT_ORCHESTRATOR.md";
const AGENT_DESCRIPTOR: &str = "INIT_AGENT.md";

/// Files seeded into a fresh home, paired with their shipped contents.
const SEED_FILES: [(&str, &str); 3] = [
    (DEFAULT_ENV, include_str!("../templates/default_env")),
    (
        ORCHESTRATOR_DESCRIPTOR,
        include_str!("../templates/INIT_ORCHESTRATOR.md"),
    ),
    (AGENT_DESCRIPTOR, include_str!("../templates/INIT_AGENT.md")),
];

/// Filesystem-backed ledger rooted at the llmmux home directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    home: PathBuf,
}

impl StateStore {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn state_dir(&self) -> PathBuf {
        self.home.join("state")
    }

    pub fn artifacts_root(&self) -> PathBuf {
        self.home.join("artifacts")
    }

    /// Controller log directory (not a session's `logs/`).
    pub fn log_dir(&self) -> PathBuf {
        self.home.join("logs")
    }

    pub fn session_dir(&self, id: &SessionId) -> PathBuf {
        self.state_dir().join(id.as_str())
    }

    pub fn agents_dir(&self, id: &SessionId) -> PathBuf {
        self.session_dir(id).join("agents")
    }

    pub fn artifacts_dir(&self, id: &SessionId) -> PathBuf {
        self.artifacts_root().join(id.as_str())
    }

    pub fn index_path(&self) -> PathBuf {
        self.state_dir().join("session_index.json")
    }

    pub fn run_state_path(&self, id: &SessionId) -> PathBuf {
        self.session_dir(id).join("run_state.json")
    }

    pub fn agent_record_path(&self, id: &SessionId, agent: &str) -> PathBuf {
        self.agents_dir(id)
            .join(format!("{}.last.json", file_stem(agent)))
    }

    pub fn default_env_path(&self) -> PathBuf {
        self.home.join(DEFAULT_ENV)
    }

    pub fn user_env_path(&self) -> PathBuf {
        self.home.join(USER_ENV)
    }

    /// Descriptor handed to the orchestrator window as its prompt.
    pub fn orchestrator_descriptor(&self) -> PathBuf {
        self.home.join(ORCHESTRATOR_DESCRIPTOR)
    }

    /// Create the home layout and seed any missing install files.
    ///
    /// Returns the names of the files that were seeded. Existing files are
    /// never touched.
    pub fn bootstrap(&self) -> Result<Vec<&'static str>, StoreError> {
        for dir in [self.state_dir(), self.artifacts_root(), self.log_dir()] {
            fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        }

        let mut seeded = Vec::new();
        for (name, contents) in SEED_FILES {
            let path = self.home.join(name);
            if path.exists() {
                continue;
            }
            fs::write(&path, contents).map_err(|e| StoreError::io(&path, e))?;
            seeded.push(name);
        }

        if !seeded.is_empty() {
            info!(home = %self.home.display(), files = ?seeded, "seeded llmmux home");
        }
        Ok(seeded)
    }

    /// Create the state and artifact directories of a new session.
    pub fn create_session_dirs(&self, id: &SessionId) -> Result<(), StoreError> {
        let session_dir = self.session_dir(id);
        let artifacts_dir = self.artifacts_dir(id);
        for dir in [
            session_dir.join("agents"),
            session_dir.join("logs"),
            artifacts_dir.join("patches"),
            artifacts_dir.join("reports"),
        ] {
            fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        }
        Ok(())
    }

    // --- Session index ---

    /// Read the index. A missing index is empty at [`Revision::Absent`].
    pub fn load_index(&self) -> Result<Versioned<SessionIndex>, StoreError> {
        Ok(
            document::load(&self.index_path())?.unwrap_or_else(|| Versioned {
                value: SessionIndex::new(),
                revision: Revision::Absent,
            }),
        )
    }

    pub fn save_index(
        &self,
        index: &SessionIndex,
        expected: Option<&Revision>,
    ) -> Result<Revision, StoreError> {
        document::save(&self.index_path(), index, expected)
    }

    /// Read-modify-write the index, re-applying `mutate` on a fresh read
    /// whenever another writer got there first.
    pub fn update_index<F>(&self, mut mutate: F) -> Result<SessionIndex, StoreError>
    where
        F: FnMut(&mut SessionIndex),
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let Versioned {
                mut value,
                revision,
            } = self.load_index()?;
            mutate(&mut value);
            match self.save_index(&value, Some(&revision)) {
                Ok(_) => return Ok(value),
                Err(e) => retry_or_fail(e, attempt)?,
            }
        }
    }

    // --- Run state ---

    pub fn load_run_state(
        &self,
        id: &SessionId,
    ) -> Result<Option<Versioned<RunState>>, StoreError> {
        document::load(&self.run_state_path(id))
    }

    pub fn save_run_state(
        &self,
        state: &RunState,
        expected: Option<&Revision>,
    ) -> Result<Revision, StoreError> {
        document::save(&self.run_state_path(&state.run_id), state, expected)
    }

    /// Read-modify-write a session's run state.
    ///
    /// Returns `false` without writing when the session has no run state.
    pub fn update_run_state<F>(&self, id: &SessionId, mut mutate: F) -> Result<bool, StoreError>
    where
        F: FnMut(&mut RunState),
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let Some(Versioned {
                mut value,
                revision,
            }) = self.load_run_state(id)?
            else {
                return Ok(false);
            };
            mutate(&mut value);
            match self.save_run_state(&value, Some(&revision)) {
                Ok(_) => return Ok(true),
                Err(e) => retry_or_fail(e, attempt)?,
            }
        }
    }

    // --- Agent records ---

    /// Write `agents/<name>.last.json` for a session.
    ///
    /// Skipped (returns `None`) when the session's agents directory does not
    /// exist; the directory is never created here.
    pub fn write_agent_record(
        &self,
        id: &SessionId,
        record: &AgentRecord,
    ) -> Result<Option<PathBuf>, StoreError> {
        if !self.agents_dir(id).is_dir() {
            debug!(session_id = %id, agent = %record.name, "no agents directory");
            return Ok(None);
        }
        let path = self.agent_record_path(id, &record.name);
        document::save(&path, record, None)?;
        Ok(Some(path))
    }

    pub fn read_agent_record(
        &self,
        id: &SessionId,
        agent: &str,
    ) -> Result<Option<AgentRecord>, StoreError> {
        Ok(document::load(&self.agent_record_path(id, agent))?.map(|v| v.value))
    }

    // --- Install config ---

    /// Variables in lookup order `.env` > process environment > `.default_env`.
    pub fn load_vars(&self) -> Result<LayeredVars<ProcessVars>, StoreError> {
        let user_path = self.user_env_path();
        let default_path = self.default_env_path();
        let overrides =
            env_file::read_env_file(&user_path).map_err(|e| StoreError::io(&user_path, e))?;
        let defaults = env_file::read_env_file(&default_path)
            .map_err(|e| StoreError::io(&default_path, e))?;
        Ok(LayeredVars::new(overrides, ProcessVars, defaults))
    }

    /// Persist `key=value` at the top of the operator's `.env`.
    pub fn save_user_var(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.user_env_path();
        env_file::set_env_var(&path, key, value).map_err(|e| StoreError::io(&path, e))
    }
}

/// Swallow a revision conflict (with a warning) while attempts remain.
fn retry_or_fail(err: StoreError, attempt: u32) -> Result<(), StoreError> {
    match err {
        StoreError::Conflict {
            ref path,
            ref expected,
            ref found,
        } if attempt < MAX_UPDATE_ATTEMPTS => {
            warn!(
                path = %path.display(),
                expected = %expected,
                found = %found,
                attempt,
                "concurrent write detected, re-applying update",
            );
            Ok(())
        }
        err => Err(err),
    }
}

/// Agent names become file names; keep them inside the agents directory.
fn file_stem(agent: &str) -> String {
    agent
        .chars()
        .map(|c| if std::path::is_separator(c) { '_' } else { c })
        .collect()
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
