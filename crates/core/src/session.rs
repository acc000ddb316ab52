//! Session state: the bearer token obtained by Login.
//!
//! A [`Session`] is an explicit handle passed into every operation
//! invocation instead of a process global. The token is guarded by a
//! read/write lock: reads never observe a torn value, and the last
//! successful Login wins.

use std::sync::RwLock;

/// Holds at most one bearer token. Empty until a successful Login.
#[derive(Default)]
pub struct Session {
    token: RwLock<String>,
}

impl Session {
    /// Create an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that already carries a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(token.into()),
        }
    }

    /// Overwrite the current token.
    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = token.into();
    }

    /// The current token, or an empty string when no Login succeeded yet.
    pub fn token(&self) -> String {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        !self
            .token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_authenticated() {
            "[REDACTED]"
        } else {
            "None"
        };
        f.debug_struct("Session").field("token", &state).finish()
    }
}
