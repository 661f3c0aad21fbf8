// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session identity.
//!
//! A session has two names: the live tmux session name, which can change
//! when a collision forces a `name(k)` rename, and the immutable
//! [`SessionId`] assigned once at creation and used to key its state
//! directory.

use crate::clock::Clock;
use crate::id::{IdGen, SUFFIX_LEN};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Session name used when the operator does not pick one.
pub const DEFAULT_SESSION_NAME: &str = "llmmux";

/// Name of the initial window every new session is created with.
pub const ORCHESTRATOR_WINDOW: &str = "orchestrator";

const ID_PREFIX: &str = "session_";
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

crate::define_id! {
    /// Immutable, globally unique session identifier.
    ///
    /// Format: `session_<YYYYMMDDTHHMMSSZ>_<8 hex chars>`.
    pub struct SessionId;
}

impl SessionId {
    /// Mint a fresh id from the clock and a random suffix.
    pub fn generate(clock: &impl Clock, ids: &impl IdGen) -> Self {
        Self::from_parts(clock.now(), &ids.next())
    }

    fn from_parts(at: DateTime<Utc>, suffix: &str) -> Self {
        Self(format!(
            "{ID_PREFIX}{}_{suffix}",
            at.format(TIMESTAMP_FORMAT)
        ))
    }

    /// Creation time encoded in the id, if it is well formed.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let (stamp, _) = self.parts()?;
        NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Whether the id matches `session_<UTC timestamp>_<8 hex chars>`.
    pub fn is_well_formed(&self) -> bool {
        let Some((_, suffix)) = self.parts() else {
            return false;
        };
        suffix.len() == SUFFIX_LEN
            && suffix
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
            && self.timestamp().is_some()
    }

    fn parts(&self) -> Option<(&str, &str)> {
        self.0.strip_prefix(ID_PREFIX)?.split_once('_')
    }
}

/// Candidate name for the `k`-th collision rename: `name(k)`.
pub fn suffixed_name(base: &str, k: u32) -> String {
    format!("{base}({k})")
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
