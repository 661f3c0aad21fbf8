// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent Window Manager: adds an agent window to a live session, launches
//! the provider in it and records the agent in the ledger.

use crate::error::EngineError;
use crate::prompt::Prompter;
use llmmux_adapters::SessionAdapter;
use llmmux_core::{resolve_command, AgentRecord, Clock, Provider, VarSource, WindowId};
use llmmux_storage::StateStore;
use std::path::PathBuf;
use tracing::{info, warn};

/// How to answer "a window with this name already exists".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Ask the operator (default no)
    #[default]
    Ask,
    /// Create a second window with the same name
    Allow,
    /// Give up without side effects
    Abort,
}

/// What to launch, and where.
#[derive(Debug, Clone)]
pub struct AgentRequest<'a> {
    pub session: &'a str,
    pub name: &'a str,
    pub provider: Provider,
    pub prompt: &'a str,
}

/// An agent window that now exists at the host.
#[derive(Debug, Clone)]
pub struct CreatedAgent {
    pub window: WindowId,
    /// Command injected into the window
    pub command: String,
    pub record: AgentRecord,
    /// Standalone `<name>.last.json`, when the agents directory existed
    pub record_path: Option<PathBuf>,
    /// Another window already had this name
    pub duplicate: bool,
}

pub struct AgentWindowManager<S, C> {
    sessions: S,
    store: StateStore,
    clock: C,
}

impl<S, C> AgentWindowManager<S, C>
where
    S: SessionAdapter,
    C: Clock,
{
    pub fn new(sessions: S, store: StateStore, clock: C) -> Self {
        Self {
            sessions,
            store,
            clock,
        }
    }

    /// Answer a window-name collision before the rest of the request is
    /// gathered. `None` when the operator declines; otherwise a policy for
    /// [`create_agent_window`](Self::create_agent_window) that will not ask
    /// again about this name.
    pub async fn settle_duplicate(
        &self,
        session: &str,
        name: &str,
        policy: DuplicatePolicy,
        prompter: &dyn Prompter,
    ) -> Result<Option<DuplicatePolicy>, EngineError> {
        if policy != DuplicatePolicy::Ask || !self.name_taken(session, name).await? {
            return Ok(Some(policy));
        }
        if confirm_duplicate(session, name, policy, prompter)? {
            Ok(Some(DuplicatePolicy::Allow))
        } else {
            info!(session, agent = name, "duplicate window declined");
            Ok(None)
        }
    }

    /// Create the window, inject the provider command, record the agent.
    ///
    /// Returns `None` when a name collision is declined; nothing has been
    /// touched in that case.
    pub async fn create_agent_window(
        &self,
        request: &AgentRequest<'_>,
        policy: DuplicatePolicy,
        prompter: &dyn Prompter,
        vars: &dyn VarSource,
    ) -> Result<Option<CreatedAgent>, EngineError> {
        let AgentRequest {
            session,
            name,
            provider,
            prompt,
        } = *request;

        if !self.sessions.has_session(session).await? {
            return Err(EngineError::SessionNotFound(session.to_string()));
        }

        let duplicate = self.name_taken(session, name).await?;
        if duplicate && !confirm_duplicate(session, name, policy, prompter)? {
            info!(session, agent = name, "duplicate window declined");
            return Ok(None);
        }

        let window = self.sessions.new_window(session, name).await?;
        let command = resolve_command(provider.as_str(), prompt, vars);
        self.sessions.send_command(&window, &command).await?;
        info!(
            session,
            agent = name,
            window = %window,
            provider = %provider,
            duplicate,
            "agent window created",
        );

        let record = AgentRecord::running(name, provider.as_str(), prompt, self.clock.now());
        let record_path = self.record(session, &record)?;

        Ok(Some(CreatedAgent {
            window,
            command,
            record,
            record_path,
            duplicate,
        }))
    }

    async fn name_taken(&self, session: &str, name: &str) -> Result<bool, EngineError> {
        Ok(self
            .sessions
            .list_windows(session)
            .await?
            .iter()
            .any(|w| w == name))
    }

    /// Persist `record` into the session's run state and its standalone
    /// last-known-state file. The window already exists, so a missing
    /// ledger is reported and skipped rather than failing the call.
    fn record(
        &self,
        session: &str,
        record: &AgentRecord,
    ) -> Result<Option<PathBuf>, EngineError> {
        let index = self.store.load_index()?.value;
        let Some(session_id) = index.get(session) else {
            warn!(session, agent = %record.name, "session not in index, agent not recorded");
            return Ok(None);
        };

        let in_run_state = self.store.update_run_state(session_id, |state| {
            state.upsert_agent(record.clone());
        })?;
        if !in_run_state {
            warn!(session, session_id = %session_id, "no run state, agent kept out of it");
        }

        let path = self.store.write_agent_record(session_id, record)?;
        if path.is_none() {
            warn!(
                session,
                session_id = %session_id,
                agent = %record.name,
                "no agents directory, skipped agent record",
            );
        }
        Ok(path)
    }
}

fn confirm_duplicate(
    session: &str,
    name: &str,
    policy: DuplicatePolicy,
    prompter: &dyn Prompter,
) -> Result<bool, EngineError> {
    Ok(match policy {
        DuplicatePolicy::Ask => prompter.confirm(
            &format!("Window '{name}' already exists in session '{session}'. Create anyway?"),
            false,
        )?,
        DuplicatePolicy::Allow => true,
        DuplicatePolicy::Abort => false,
    })
}

#[cfg(test)]
#[path = "agent_window_tests.rs"]
mod tests;
