// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! LLM provider identifiers and startup command resolution.

use crate::vars::VarSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Literal placeholder replaced by the prompt text in a command template.
pub const PROMPT_PLACEHOLDER: &str = "{prompt}";

/// Prefix of the variable holding a provider's command template.
pub const TEMPLATE_VAR_PREFIX: &str = "PROVIDER_";

/// The fixed provider enumeration accepted from operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    /// Cursor's agent CLI
    Agent,
    Codex,
    Claude,
    Opencode,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid provider '{given}' (valid providers: {})", Provider::names().join(", "))]
pub struct InvalidProvider {
    pub given: String,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::Gemini,
        Provider::Agent,
        Provider::Codex,
        Provider::Claude,
        Provider::Opencode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Agent => "agent",
            Provider::Codex => "codex",
            Provider::Claude => "claude",
            Provider::Opencode => "opencode",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Provider::as_str).collect()
    }

    /// Built-in command template used when no `PROVIDER_<id>` is configured.
    fn builtin_template(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini -p '{prompt}'",
            Provider::Agent => "agent '{prompt}'",
            Provider::Codex => "codex '{prompt}'",
            Provider::Claude => "claude '{prompt}'",
            Provider::Opencode => "opencode '{prompt}'",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = InvalidProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| InvalidProvider {
                given: s.to_string(),
            })
    }
}

/// Resolve the shell command that launches `provider` with `prompt`.
///
/// A `PROVIDER_<provider>` template from `vars` wins over the built-in one.
/// Unknown providers fall back to `<provider> '{prompt}'`. The prompt is
/// substituted verbatim: no shell escaping is applied.
pub fn resolve_command(provider: &str, prompt: &str, vars: &dyn VarSource) -> String {
    let template = vars
        .var(&format!("{TEMPLATE_VAR_PREFIX}{provider}"))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| match provider.parse::<Provider>() {
            Ok(known) => known.builtin_template().to_string(),
            Err(_) => format!("{provider} '{PROMPT_PLACEHOLDER}'"),
        });
    template.replace(PROMPT_PLACEHOLDER, prompt)
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
