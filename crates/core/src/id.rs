// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier newtypes and random suffix generation

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Define a newtype ID wrapper around `String`.
///
/// Generates `new()`, `as_str()`, `Display`, `From<String>`, `From<&str>`,
/// `PartialEq<str>`, `PartialEq<&str>`, and `Borrow<str>` implementations.
/// The wrapper serializes as a bare string.
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Length of the random hex suffix carried by session ids.
pub const SUFFIX_LEN: usize = 8;

/// Generates short random hex suffixes for identifiers.
pub trait IdGen: Clone + Send + Sync {
    /// Returns [`SUFFIX_LEN`] lowercase hex characters.
    fn next(&self) -> String;
}

/// UUID-backed generator for production use.
///
/// Remembers every suffix it has handed out so a single process never
/// issues the same one twice.
#[derive(Clone, Default)]
pub struct UuidIdGen {
    issued: Arc<Mutex<HashSet<String>>>,
}

impl UuidIdGen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGen for UuidIdGen {
    fn next(&self) -> String {
        let mut issued = self.issued.lock();
        loop {
            let simple = uuid::Uuid::new_v4().simple().to_string();
            let suffix = simple[..SUFFIX_LEN].to_string();
            if issued.insert(suffix.clone()) {
                return suffix;
            }
        }
    }
}

/// Sequential generator for testing: `00000001`, `00000002`, ...
#[derive(Clone)]
pub struct SequentialIdGen {
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new() -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{:08x}", n & 0xFFFF_FFFF)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
