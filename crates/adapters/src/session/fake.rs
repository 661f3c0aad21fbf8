// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake session adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{SessionAdapter, SessionError};
use async_trait::async_trait;
use llmmux_core::WindowId;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Recorded session call
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCall {
    CheckAvailable,
    HasSession { name: String },
    ListSessions,
    NewSession { name: String, window: String, cwd: PathBuf },
    NewWindow { session: String, window: String },
    ListWindows { session: String },
    SendCommand { window: WindowId, command: String },
    KillSession { name: String },
    SessionOfPane { pane: String },
}

/// Fake window state
#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub id: WindowId,
    pub name: String,
    /// Commands injected into this window, in order
    pub sent: Vec<String>,
}

/// Fake session state
#[derive(Debug, Clone)]
pub struct FakeSession {
    pub name: String,
    pub cwd: PathBuf,
    pub windows: Vec<FakeWindow>,
}

struct FakeSessionState {
    available: bool,
    sessions: BTreeMap<String, FakeSession>,
    panes: HashMap<String, String>,
    fail_new_session: Option<String>,
    calls: Vec<SessionCall>,
    next_window: u64,
}

impl FakeSessionState {
    fn next_window_id(&mut self) -> WindowId {
        self.next_window += 1;
        WindowId::new(format!("@{}", self.next_window))
    }

    fn window_mut(&mut self, id: &WindowId) -> Option<&mut FakeWindow> {
        self.sessions
            .values_mut()
            .flat_map(|s| s.windows.iter_mut())
            .find(|w| &w.id == id)
    }
}

/// Fake session adapter for testing
#[derive(Clone)]
pub struct FakeSessionAdapter {
    inner: Arc<Mutex<FakeSessionState>>,
}

impl Default for FakeSessionAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeSessionState {
                available: true,
                sessions: BTreeMap::new(),
                panes: HashMap::new(),
                fail_new_session: None,
                calls: Vec::new(),
                next_window: 0,
            })),
        }
    }
}

impl FakeSessionAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SessionCall> {
        self.inner.lock().calls.clone()
    }

    /// Get a live session by name
    pub fn get_session(&self, name: &str) -> Option<FakeSession> {
        self.inner.lock().sessions.get(name).cloned()
    }

    /// Names of all live sessions
    pub fn session_names(&self) -> Vec<String> {
        self.inner.lock().sessions.keys().cloned().collect()
    }

    /// Add a pre-existing live session with a single window
    pub fn add_session(&self, name: &str, windows: &[&str]) {
        let mut inner = self.inner.lock();
        let windows = windows
            .iter()
            .map(|w| FakeWindow {
                id: inner.next_window_id(),
                name: w.to_string(),
                sent: Vec::new(),
            })
            .collect();
        inner.sessions.insert(
            name.to_string(),
            FakeSession {
                name: name.to_string(),
                cwd: PathBuf::from("/tmp"),
                windows,
            },
        );
    }

    /// Simulate the multiplexer disappearing from PATH
    pub fn set_available(&self, available: bool) {
        self.inner.lock().available = available;
    }

    /// Make the next `new_session` calls fail with this message
    pub fn fail_new_session(&self, message: &str) {
        self.inner.lock().fail_new_session = Some(message.to_string());
    }

    /// Register a pane as belonging to a session
    pub fn set_pane(&self, pane: &str, session: &str) {
        self.inner
            .lock()
            .panes
            .insert(pane.to_string(), session.to_string());
    }

    /// Commands injected into a window
    pub fn sent_to(&self, window: &WindowId) -> Vec<String> {
        self.inner
            .lock()
            .window_mut(window)
            .map(|w| w.sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SessionAdapter for FakeSessionAdapter {
    async fn check_available(&self) -> Result<String, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::CheckAvailable);
        if inner.available {
            Ok("tmux fake".to_string())
        } else {
            Err(SessionError::Unavailable(
                "tmux is not installed or not in PATH".to_string(),
            ))
        }
    }

    async fn has_session(&self, name: &str) -> Result<bool, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::HasSession {
            name: name.to_string(),
        });
        Ok(inner.sessions.contains_key(name))
    }

    async fn list_sessions(&self) -> Result<Vec<String>, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::ListSessions);
        Ok(inner.sessions.keys().cloned().collect())
    }

    async fn new_session(
        &self,
        name: &str,
        window: &str,
        cwd: &Path,
    ) -> Result<WindowId, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::NewSession {
            name: name.to_string(),
            window: window.to_string(),
            cwd: cwd.to_path_buf(),
        });

        if let Some(message) = inner.fail_new_session.clone() {
            return Err(SessionError::SpawnFailed(message));
        }
        if inner.sessions.contains_key(name) {
            return Err(SessionError::SpawnFailed(format!(
                "duplicate session: {}",
                name
            )));
        }

        let id = inner.next_window_id();
        inner.sessions.insert(
            name.to_string(),
            FakeSession {
                name: name.to_string(),
                cwd: cwd.to_path_buf(),
                windows: vec![FakeWindow {
                    id: id.clone(),
                    name: window.to_string(),
                    sent: Vec::new(),
                }],
            },
        );
        Ok(id)
    }

    async fn new_window(&self, session: &str, window: &str) -> Result<WindowId, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::NewWindow {
            session: session.to_string(),
            window: window.to_string(),
        });

        if !inner.sessions.contains_key(session) {
            return Err(SessionError::NotFound(session.to_string()));
        }
        let id = inner.next_window_id();
        if let Some(s) = inner.sessions.get_mut(session) {
            s.windows.push(FakeWindow {
                id: id.clone(),
                name: window.to_string(),
                sent: Vec::new(),
            });
        }
        Ok(id)
    }

    async fn list_windows(&self, session: &str) -> Result<Vec<String>, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::ListWindows {
            session: session.to_string(),
        });
        match inner.sessions.get(session) {
            Some(s) => Ok(s.windows.iter().map(|w| w.name.clone()).collect()),
            None => Err(SessionError::NotFound(session.to_string())),
        }
    }

    async fn send_command(&self, window: &WindowId, command: &str) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::SendCommand {
            window: window.clone(),
            command: command.to_string(),
        });
        match inner.window_mut(window) {
            Some(w) => {
                w.sent.push(command.to_string());
                Ok(())
            }
            None => Err(SessionError::NotFound(window.to_string())),
        }
    }

    async fn kill_session(&self, name: &str) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::KillSession {
            name: name.to_string(),
        });
        match inner.sessions.remove(name) {
            Some(_) => Ok(()),
            None => Err(SessionError::NotFound(name.to_string())),
        }
    }

    async fn session_of_pane(&self, pane: &str) -> Result<Option<String>, SessionError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SessionCall::SessionOfPane {
            pane: pane.to_string(),
        });
        let session = inner.panes.get(pane).cloned();
        Ok(session.filter(|s| inner.sessions.contains_key(s)))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
