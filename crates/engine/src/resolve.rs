// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parameter Resolver.
//!
//! Each parameter is taken from, in order: the explicit value, ambient
//! context (session name for `agent` only), then the operator. An empty
//! explicit value counts as absent.

use crate::context::AmbientContext;
use crate::env::DEFAULT_PROVIDER_VAR;
use crate::error::EngineError;
use crate::prompt::{PromptError, Prompter};
use crate::session_manager::validate_session_name;
use llmmux_adapters::SessionAdapter;
use llmmux_core::{Provider, VarSource, DEFAULT_SESSION_NAME};
use llmmux_storage::StateStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prompt used when the operator gives none.
pub const GENERIC_PROMPT: &str =
    "You are a specialized agent. Ask the user what task you should work on.";

const SKILL_FILE: &str = "SKILL.md";

pub struct ParameterResolver<'a> {
    prompter: &'a dyn Prompter,
    vars: &'a dyn VarSource,
}

impl<'a> ParameterResolver<'a> {
    pub fn new(prompter: &'a dyn Prompter, vars: &'a dyn VarSource) -> Self {
        Self { prompter, vars }
    }

    /// Session name for `start`; defaults to `llmmux`.
    pub fn session_name(&self, explicit: Option<&str>) -> Result<String, EngineError> {
        let name = match non_empty(explicit) {
            Some(name) => name.to_string(),
            None => self
                .prompter
                .text("Session name", Some(DEFAULT_SESSION_NAME))?
                .trim()
                .to_string(),
        };
        let name = if name.is_empty() {
            DEFAULT_SESSION_NAME.to_string()
        } else {
            name
        };
        validate_session_name(&name)?;
        Ok(name)
    }

    /// Absolute project root; relative answers are taken from `cwd`, which
    /// is also the interactive default.
    pub fn project_root(
        &self,
        explicit: Option<&Path>,
        cwd: &Path,
    ) -> Result<PathBuf, EngineError> {
        let raw = match explicit.filter(|p| !p.as_os_str().is_empty()) {
            Some(p) => p.to_path_buf(),
            None => {
                let default = cwd.display().to_string();
                PathBuf::from(self.prompter.text("Project root", Some(&default))?.trim())
            }
        };
        let joined = cwd.join(&raw);
        match joined.canonicalize() {
            Ok(root) if root.is_dir() => Ok(root),
            _ => Err(EngineError::InvalidProjectRoot(joined)),
        }
    }

    /// Validate an explicit provider before anything else is resolved, so
    /// a bad value never reaches a prompt or touches disk.
    pub fn explicit_provider(explicit: Option<&str>) -> Result<Option<Provider>, EngineError> {
        Ok(non_empty(explicit).map(str::parse::<Provider>).transpose()?)
    }

    /// Provider: explicit (already validated by
    /// [`explicit_provider`](Self::explicit_provider)), then the configured
    /// default if the operator confirms it, then a choice from the fixed
    /// list.
    ///
    /// With `save_to`, a provider picked from the list is offered as the new
    /// default and written to the operator's `.env` on acceptance.
    pub fn provider(
        &self,
        explicit: Option<Provider>,
        save_to: Option<&StateStore>,
    ) -> Result<Provider, EngineError> {
        if let Some(given) = explicit {
            return Ok(given);
        }

        if let Some(default) = self
            .vars
            .var(DEFAULT_PROVIDER_VAR)
            .and_then(|v| v.parse::<Provider>().ok())
        {
            let message = format!("Use default provider '{default}'?");
            if self.prompter.confirm(&message, true)? {
                return Ok(default);
            }
        }

        let options: Vec<String> = Provider::names().into_iter().map(String::from).collect();
        let index = self.prompter.select("Select provider", &options)?;
        let provider = *Provider::ALL.get(index).ok_or_else(|| out_of_range(index))?;

        if let Some(store) = save_to {
            if self.prompter.confirm("Save as default provider?", false)? {
                store.save_user_var(DEFAULT_PROVIDER_VAR, provider.as_str())?;
                info!(provider = %provider, "saved default provider");
            }
        }
        Ok(provider)
    }

    /// Target session for `agent`: explicit (must be live), then the
    /// session the caller runs inside, then a choice among live sessions.
    pub async fn agent_session<S: SessionAdapter>(
        &self,
        explicit: Option<&str>,
        sessions: &S,
        ambient: &dyn AmbientContext,
    ) -> Result<String, EngineError> {
        if let Some(name) = non_empty(explicit) {
            if !sessions.has_session(name).await? {
                return Err(EngineError::SessionNotFound(name.to_string()));
            }
            return Ok(name.to_string());
        }

        if let Some(current) = ambient.current_session().await? {
            debug!(session = %current, "using ambient session");
            return Ok(current);
        }

        let live = sessions.list_sessions().await?;
        if live.is_empty() {
            return Err(EngineError::NoSessions);
        }
        let index = self.prompter.select("Select session", &live)?;
        Ok(live.into_iter().nth(index).ok_or_else(|| out_of_range(index))?)
    }

    /// Agent window name; asks until a non-empty one is given.
    pub fn agent_name(&self, explicit: Option<&str>) -> Result<String, EngineError> {
        if let Some(name) = non_empty(explicit) {
            return Ok(name.to_string());
        }
        loop {
            let name = self.prompter.text("Agent window name", None)?;
            let name = name.trim();
            if !name.is_empty() {
                return Ok(name.to_string());
            }
        }
    }

    /// Prompt text: explicit, then a skill reference, then free text from
    /// the operator, then [`GENERIC_PROMPT`].
    pub fn prompt(
        &self,
        explicit: Option<&str>,
        skill: Option<&str>,
        skill_roots: &[PathBuf],
    ) -> Result<String, EngineError> {
        if let Some(prompt) = non_empty(explicit) {
            return Ok(prompt.to_string());
        }

        if let Some(skill) = non_empty(skill) {
            return Ok(match find_skill(skill, skill_roots) {
                Some(path) => format!("refer to skill: {}", path.display()),
                None => format!("use skill: {skill}"),
            });
        }

        let text = self.prompter.text_block(
            "Agent prompt (finish with Ctrl-D, leave empty for a generic task prompt)",
        )?;
        let text = text.trim();
        if text.is_empty() {
            Ok(GENERIC_PROMPT.to_string())
        } else {
            Ok(text.to_string())
        }
    }
}

/// First `<root>/<skill>/SKILL.md` that exists.
pub fn find_skill(skill: &str, roots: &[PathBuf]) -> Option<PathBuf> {
    roots
        .iter()
        .map(|root| root.join(skill).join(SKILL_FILE))
        .find(|path| path.is_file())
}

fn out_of_range(index: usize) -> PromptError {
    PromptError::Failed(format!("selection {} is out of range", index + 1))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
