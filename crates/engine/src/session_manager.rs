// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session Manager: creates named tmux sessions and resolves name
//! collisions with sessions that are already live.
//!
//! Creation pre-writes the ledger (state directories, index entry, initial
//! run state) before asking tmux for the session. If tmux then fails, the
//! error propagates and the ledger keeps pointing at a session that does
//! not exist; `llmmux sessions` reports such entries as stale.

use crate::error::EngineError;
use crate::prompt::Prompter;
use llmmux_adapters::{SessionAdapter, SessionError};
use llmmux_core::session::suffixed_name;
use llmmux_core::{
    resolve_command, Clock, IdGen, Provider, RunState, SessionId, VarSource, WindowId,
    DEFAULT_SESSION_NAME, ORCHESTRATOR_WINDOW,
};
use llmmux_storage::{Revision, StateStore};
use std::path::Path;
use tracing::{debug, info};

/// How to answer "a live session already has this name".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Ask the operator
    #[default]
    Ask,
    /// Keep the old session and use the first free `name(k)`
    Keep,
    /// Kill the old session and reuse the name
    Replace,
    /// Give up without side effects
    Abort,
}

const CONFLICT_CHOICES: [(ConflictPolicy, &str); 3] = [
    (
        ConflictPolicy::Keep,
        "Keep old and add new (adds suffix like 'name(1)')",
    ),
    (ConflictPolicy::Replace, "Stop old and start new"),
    (ConflictPolicy::Abort, "Quit"),
];

/// The name a new session will be created under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePlan {
    /// Name the caller asked for
    pub requested: String,
    /// Name the session will actually get
    pub name: String,
    /// A live session named `name` must be killed first
    pub replace: bool,
}

/// A session that now exists at the host and in the ledger.
#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub name: String,
    pub session_id: SessionId,
    pub orchestrator: WindowId,
    /// Command injected into the orchestrator window
    pub command: String,
    pub replaced: bool,
}

/// Reject names tmux cannot address as a session target.
pub fn validate_session_name(name: &str) -> Result<(), EngineError> {
    if name.is_empty() || name.contains([':', '.']) {
        return Err(EngineError::InvalidSessionName(name.to_string()));
    }
    Ok(())
}

/// Verify tmux is usable; returns its version string.
pub async fn check_host<S: SessionAdapter>(sessions: &S) -> Result<String, EngineError> {
    match sessions.check_available().await {
        Ok(version) => Ok(version),
        Err(SessionError::Unavailable(msg)) => Err(EngineError::HostUnavailable(msg)),
        Err(e) => Err(e.into()),
    }
}

pub struct SessionManager<S, C, I> {
    sessions: S,
    store: StateStore,
    clock: C,
    ids: I,
}

impl<S, C, I> SessionManager<S, C, I>
where
    S: SessionAdapter,
    C: Clock,
    I: IdGen,
{
    pub fn new(sessions: S, store: StateStore, clock: C, ids: I) -> Self {
        Self {
            sessions,
            store,
            clock,
            ids,
        }
    }

    /// Create-or-resolve in one step: decide the name, then create.
    ///
    /// Returns `None` when the operator (or `policy`) aborts; nothing has
    /// been touched in that case.
    pub async fn create_or_resolve(
        &self,
        requested: &str,
        project_root: &Path,
        provider: Provider,
        policy: ConflictPolicy,
        prompter: &dyn Prompter,
        vars: &dyn VarSource,
    ) -> Result<Option<CreatedSession>, EngineError> {
        let Some(plan) = self.plan_name(requested, policy, prompter).await? else {
            return Ok(None);
        };
        self.create(&plan, project_root, provider, vars)
            .await
            .map(Some)
    }

    /// Decide which name to create under. Side-effect free at the host.
    pub async fn plan_name(
        &self,
        requested: &str,
        policy: ConflictPolicy,
        prompter: &dyn Prompter,
    ) -> Result<Option<NamePlan>, EngineError> {
        let requested = if requested.is_empty() {
            DEFAULT_SESSION_NAME
        } else {
            requested
        };
        validate_session_name(requested)?;

        if !self.sessions.has_session(requested).await? {
            return Ok(Some(NamePlan {
                requested: requested.to_string(),
                name: requested.to_string(),
                replace: false,
            }));
        }

        let decision = match policy {
            ConflictPolicy::Ask => {
                let labels: Vec<String> =
                    CONFLICT_CHOICES.iter().map(|(_, l)| l.to_string()).collect();
                let message = format!("Session '{requested}' already exists");
                let index = prompter.select(&message, &labels)?;
                CONFLICT_CHOICES
                    .get(index)
                    .map(|(p, _)| *p)
                    .unwrap_or(ConflictPolicy::Abort)
            }
            other => other,
        };
        debug!(session = requested, ?decision, "session name conflict");

        let plan = match decision {
            ConflictPolicy::Keep => NamePlan {
                requested: requested.to_string(),
                name: self.free_name(requested).await?,
                replace: false,
            },
            ConflictPolicy::Replace => NamePlan {
                requested: requested.to_string(),
                name: requested.to_string(),
                replace: true,
            },
            ConflictPolicy::Abort | ConflictPolicy::Ask => return Ok(None),
        };
        Ok(Some(plan))
    }

    /// First `base(k)`, k = 1, 2, …, with no live session of that name.
    pub async fn free_name(&self, base: &str) -> Result<String, EngineError> {
        let mut k = 1;
        loop {
            let candidate = suffixed_name(base, k);
            if !self.sessions.has_session(&candidate).await? {
                return Ok(candidate);
            }
            k += 1;
        }
    }

    /// Create the session described by `plan` and launch its orchestrator.
    pub async fn create(
        &self,
        plan: &NamePlan,
        project_root: &Path,
        provider: Provider,
        vars: &dyn VarSource,
    ) -> Result<CreatedSession, EngineError> {
        if plan.replace {
            match self.sessions.kill_session(&plan.name).await {
                Ok(()) => info!(session = %plan.name, "killed existing session"),
                Err(SessionError::NotFound(_)) => {
                    debug!(session = %plan.name, "session already gone")
                }
                Err(e) => return Err(e.into()),
            }
        }

        let session_id = self.fresh_session_id()?;

        self.store.create_session_dirs(&session_id)?;
        self.store.update_index(|index| {
            index.insert(plan.name.clone(), session_id.clone());
        })?;
        let run_state = RunState::new(
            session_id.clone(),
            plan.name.clone(),
            project_root,
            provider.as_str(),
            self.clock.now(),
        );
        self.store
            .save_run_state(&run_state, Some(&Revision::Absent))?;

        let orchestrator = self
            .sessions
            .new_session(&plan.name, ORCHESTRATOR_WINDOW, project_root)
            .await?;

        let prompt = format!(
            "orchestrator agent: refer to {}",
            self.store.orchestrator_descriptor().display()
        );
        let command = resolve_command(provider.as_str(), &prompt, vars);
        self.sessions.send_command(&orchestrator, &command).await?;

        info!(
            session = %plan.name,
            session_id = %session_id,
            provider = %provider,
            root = %project_root.display(),
            "session created",
        );

        Ok(CreatedSession {
            name: plan.name.clone(),
            session_id,
            orchestrator,
            command,
            replaced: plan.replace,
        })
    }

    /// A session id not already present in the index.
    fn fresh_session_id(&self) -> Result<SessionId, EngineError> {
        let index = self.store.load_index()?.value;
        loop {
            let id = SessionId::generate(&self.clock, &self.ids);
            if !index.contains_id(&id) {
                return Ok(id);
            }
            debug!(session_id = %id, "session id already indexed, regenerating");
        }
    }
}

#[cfg(test)]
#[path = "session_manager_tests.rs"]
mod tests;
