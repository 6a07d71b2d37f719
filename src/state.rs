//! Core application state, separated from UI logic.
//!
//! `ClientState` holds all data behind the three views: search results,
//! scan/robot state, the guidance modal, the chat transcript and the
//! guided recommendation form. UI components receive the pieces they
//! render as parameters rather than owning them.

use std::time::Instant;

use crate::models::{Book, RobotStatus};
use crate::protocol::RevealGate;
use crate::recommend::RecommendForm;
use crate::transcript::Transcript;

/// Which surface is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Home,
    Chat,
    AdminLogin,
    Admin,
}

#[derive(Default)]
pub struct SearchState {
    pub results: Vec<Book>,
    pub is_searching: bool,
    pub has_searched: bool,
    pub error: Option<String>,
}

impl SearchState {
    pub fn clear(&mut self) {
        self.results.clear();
        self.is_searching = false;
        self.has_searched = false;
        self.error = None;
    }
}

#[derive(Default)]
pub struct ScanState {
    pub scanning: bool,
    pub robot: RobotStatus,
    /// A start/stop request is on the wire; buttons disable meanwhile.
    pub pending: bool,
}

/// The guidance modal for one book, while the robot is on its way.
pub struct GuideRun {
    pub barcode: String,
    pub title: String,
    /// Backend-issued id, echoed back on cancel once it arrives.
    pub request_id: Option<String>,
    pub pending: bool,
}

/// Core application state for the library client.
pub struct ClientState {
    pub view: View,
    pub search: SearchState,
    pub scan: ScanState,
    pub guide: Option<GuideRun>,
    pub transcript: Transcript,
    pub recommend: RecommendForm,

    /// Status toast messages with creation time (auto-expire).
    pub status_messages: Vec<(String, Instant)>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            view: View::Home,
            search: SearchState::default(),
            scan: ScanState::default(),
            guide: None,
            transcript: Transcript::new(),
            recommend: RecommendForm::default(),
            status_messages: Vec::new(),
        }
    }

    pub fn push_status(&mut self, message: impl Into<String>) {
        self.status_messages.push((message.into(), Instant::now()));
    }

    /// Purge status messages older than the given duration.
    pub fn purge_old_status_messages(&mut self, max_age_secs: u64) {
        self.status_messages
            .retain(|(_, created)| created.elapsed().as_secs() < max_age_secs);
    }

    pub fn open_chat(&mut self) {
        self.view = View::Chat;
    }

    /// Leave the chat view. The transcript is session-scoped: it is torn
    /// down here and the gate cleared so a live reveal stops ticking.
    pub fn close_chat(&mut self, gate: &RevealGate) {
        gate.clear();
        self.transcript.reset();
        self.recommend.close();
        self.view = View::Home;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = ClientState::new();
        assert_eq!(state.view, View::Home);
        assert!(!state.search.has_searched);
        assert!(state.guide.is_none());
        assert!(state.transcript.is_fresh());
    }

    #[test]
    fn test_close_chat_resets_transcript_and_gate() {
        let gate = RevealGate::new();
        let mut state = ClientState::new();
        state.open_chat();
        state.transcript.push_user("hello").unwrap();
        let request = state.transcript.begin_reply();
        gate.arm(request);

        state.close_chat(&gate);
        assert_eq!(state.view, View::Home);
        assert!(state.transcript.is_fresh());
        assert!(!gate.is_current(request));
    }

    #[test]
    fn test_status_message_purge() {
        let mut state = ClientState::new();
        state.push_status("saved");
        // Not old enough to purge.
        state.purge_old_status_messages(4);
        assert_eq!(state.status_messages.len(), 1);
        // Zero max-age drops everything.
        state.purge_old_status_messages(0);
        assert!(state.status_messages.is_empty());
    }

    #[test]
    fn test_search_clear() {
        let mut state = ClientState::new();
        state.search.has_searched = true;
        state.search.error = Some("boom".into());
        state.search.results.push(Book::default());
        state.search.clear();
        assert!(state.search.results.is_empty());
        assert!(!state.search.has_searched);
        assert!(state.search.error.is_none());
    }
}
