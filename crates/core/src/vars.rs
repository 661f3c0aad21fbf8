// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key/value variable sources.
//!
//! Provider templates and defaults are looked up through [`VarSource`] so the
//! resolver never touches the process environment directly.

use std::collections::BTreeMap;

/// Opaque key → string lookup. Absence is not an error.
pub trait VarSource: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

impl VarSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// The live process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessVars;

impl VarSource for ProcessVars {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Three-layer lookup: `overrides` > `base` > `defaults`.
///
/// Mirrors how the controller reads its install config: the operator's
/// `.env` beats the process environment, which beats the shipped
/// `.default_env`.
pub struct LayeredVars<B> {
    overrides: BTreeMap<String, String>,
    base: B,
    defaults: BTreeMap<String, String>,
}

impl<B: VarSource> LayeredVars<B> {
    pub fn new(
        overrides: BTreeMap<String, String>,
        base: B,
        defaults: BTreeMap<String, String>,
    ) -> Self {
        Self {
            overrides,
            base,
            defaults,
        }
    }
}

impl<B: VarSource> VarSource for LayeredVars<B> {
    fn var(&self, key: &str) -> Option<String> {
        self.overrides
            .get(key)
            .cloned()
            .or_else(|| self.base.var(key))
            .or_else(|| self.defaults.get(key).cloned())
    }
}

#[cfg(test)]
#[path = "vars_tests.rs"]
mod tests;
