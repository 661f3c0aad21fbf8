// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! llmmux-core: domain types for the llmmux session controller

pub mod agent_record;
pub mod clock;
pub mod id;
pub mod provider;
pub mod run_state;
pub mod session;
pub mod vars;
pub mod window;

pub use agent_record::{AgentRecord, AgentRecordStatus};
pub use clock::{Clock, FakeClock, SystemClock};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use provider::{resolve_command, InvalidProvider, Provider};
pub use run_state::RunState;
pub use session::{SessionId, DEFAULT_SESSION_NAME, ORCHESTRATOR_WINDOW};
pub use vars::{LayeredVars, ProcessVars, VarSource};
pub use window::WindowId;
