// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! llmmux session and agent lifecycle engine

mod agent_window;
pub mod context;
pub mod env;
mod error;
pub mod prompt;
mod resolve;
mod session_manager;

#[cfg(test)]
mod test_helpers;

pub use agent_window::{AgentRequest, AgentWindowManager, CreatedAgent, DuplicatePolicy};
pub use context::{AmbientContext, TmuxContext};
pub use error::EngineError;
pub use prompt::{PromptError, Prompter};
pub use resolve::{find_skill, ParameterResolver, GENERIC_PROMPT};
pub use session_manager::{
    check_host, validate_session_name, ConflictPolicy, CreatedSession, NamePlan, SessionManager,
};

#[cfg(any(test, feature = "test-support"))]
pub use context::FakeContext;
#[cfg(any(test, feature = "test-support"))]
pub use prompt::FakePrompter;
