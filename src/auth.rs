//! Admin gate state.
//!
//! Not a security boundary: the code check runs client-side and only
//! decides which views render. The state is an explicit object owned by
//! the app and passed by reference to the views that need it: restored
//! from a persisted session marker at startup, cleared on logout.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::config;

#[derive(Serialize, Deserialize)]
struct SessionMarker {
    admin: bool,
}

pub struct AuthState {
    admin: bool,
    /// Where the session marker lives; `None` keeps the state in memory
    /// only (used by tests).
    session_file: Option<PathBuf>,
}

impl AuthState {
    /// Restore the admin flag from the persisted session marker.
    pub fn restore() -> Self {
        let session_file = config::session_path();
        let admin = session_file
            .as_deref()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|content| serde_json::from_str::<SessionMarker>(&content).ok())
            .is_some_and(|marker| marker.admin);
        Self {
            admin,
            session_file,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            admin: false,
            session_file: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Check the entered code against the configured one. On success the
    /// flag is set and the session marker written.
    pub fn login(&mut self, code: &str, expected: &str) -> bool {
        if code != expected {
            return false;
        }
        self.admin = true;
        if let Some(path) = &self.session_file {
            let marker = SessionMarker { admin: true };
            let data = serde_json::to_string(&marker).expect("marker always serializes");
            if let Err(e) = fs::write(path, data) {
                tracing::warn!(error = %e, "failed to persist admin session");
            }
        }
        true
    }

    /// Clear the flag and remove the session marker.
    pub fn logout(&mut self) {
        self.admin = false;
        if let Some(path) = &self.session_file {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    tracing::warn!(error = %e, "failed to clear admin session");
                }
            }
        }
    }
}
