//! Event processing from backend

use super::BiblioApp;
use crate::models::RobotStatus;
use crate::protocol::GuiEvent;

impl BiblioApp {
    /// Drain all pending events from the backend into the state. This is
    /// the only place the transcript is mutated asynchronously, and it
    /// runs on the UI thread.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                GuiEvent::ReplyStarted { request } => {
                    self.state.transcript.start_reveal(request);
                }
                GuiEvent::ReplyChunk { request, text } => {
                    self.state.transcript.apply_chunk(request, &text);
                }
                GuiEvent::ReplyDone { request, text } => {
                    self.state.transcript.complete_reply(request, &text);
                }
                GuiEvent::ReplyFailed { request, question } => {
                    self.state.transcript.fail_reply(request, &question);
                }

                GuiEvent::SearchResults(books) => {
                    self.state.search.is_searching = false;
                    self.state.search.error = None;
                    self.state.search.results = books;
                }
                GuiEvent::SearchFailed(message) => {
                    self.state.search.is_searching = false;
                    self.state.search.results.clear();
                    self.state.search.error = Some(message);
                }

                GuiEvent::ScanStateChanged { scanning } => {
                    self.state.scan.pending = false;
                    self.state.scan.scanning = scanning;
                    self.state.push_status(if scanning {
                        "Shelf scan started"
                    } else {
                        "Shelf scan stopped"
                    });
                }
                GuiEvent::RobotStatus(status) => {
                    self.state.scan.robot = status;
                    if status == RobotStatus::Complete {
                        self.state.scan.scanning = false;
                    }
                }

                GuiEvent::GuideStarted { request_id } => {
                    if let Some(run) = &mut self.state.guide {
                        run.request_id = request_id;
                        run.pending = false;
                    }
                }
                GuiEvent::GuideFailed(message) => {
                    self.state.guide = None;
                    self.state.push_status(message);
                }
                GuiEvent::GuideCancelled => {
                    self.state.guide = None;
                }

                GuiEvent::Error(message) => {
                    self.state.scan.pending = false;
                    self.state.push_status(message);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Book;
    use crate::protocol::BackendAction;
    use crossbeam_channel::unbounded;

    /// Build an app wired to loose channel ends, without a backend thread.
    fn test_app() -> (
        BiblioApp,
        crossbeam_channel::Sender<GuiEvent>,
        crossbeam_channel::Receiver<BackendAction>,
    ) {
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();
        let app = BiblioApp {
            state: crate::state::ClientState::new(),
            auth: crate::auth::AuthState::in_memory(),
            settings: crate::config::Settings::default(),
            action_tx,
            event_rx,
            gate: crate::protocol::RevealGate::new(),
            search_input: String::new(),
            chat_input: String::new(),
            admin_code_input: String::new(),
            auth_error: None,
            last_status_poll: None,
        };
        (app, event_tx, action_rx)
    }

    #[test]
    fn test_search_events_update_state() {
        let (mut app, event_tx, _action_rx) = test_app();
        app.state.search.is_searching = true;
        app.state.search.has_searched = true;

        event_tx
            .send(GuiEvent::SearchResults(vec![Book {
                barcode: "B1".into(),
                title: "Walden".into(),
                author: "Thoreau".into(),
                ..Book::default()
            }]))
            .unwrap();
        app.process_events();

        assert!(!app.state.search.is_searching);
        assert_eq!(app.state.search.results.len(), 1);

        event_tx
            .send(GuiEvent::SearchFailed("Search failed.".into()))
            .unwrap();
        app.process_events();
        assert!(app.state.search.results.is_empty());
        assert_eq!(app.state.search.error.as_deref(), Some("Search failed."));
    }

    #[test]
    fn test_reply_events_drive_transcript() {
        let (mut app, event_tx, _action_rx) = test_app();
        app.state.transcript.push_user("hello").unwrap();
        let request = app.state.transcript.begin_reply();

        event_tx.send(GuiEvent::ReplyStarted { request }).unwrap();
        event_tx
            .send(GuiEvent::ReplyChunk {
                request,
                text: "hi".into(),
            })
            .unwrap();
        event_tx
            .send(GuiEvent::ReplyDone {
                request,
                text: "hi there".into(),
            })
            .unwrap();
        app.process_events();

        let last = app.state.transcript.messages().last().unwrap();
        assert_eq!(last.content, "hi there");
        assert!(!app.state.transcript.is_in_flight());
    }

    #[test]
    fn test_scan_complete_clears_scanning_flag() {
        let (mut app, event_tx, _action_rx) = test_app();
        event_tx
            .send(GuiEvent::ScanStateChanged { scanning: true })
            .unwrap();
        app.process_events();
        assert!(app.state.scan.scanning);

        event_tx
            .send(GuiEvent::RobotStatus(RobotStatus::Complete))
            .unwrap();
        app.process_events();
        assert!(!app.state.scan.scanning);
        assert_eq!(app.state.scan.robot, RobotStatus::Complete);
    }

    #[test]
    fn test_invalid_recommendation_never_reaches_transport() {
        let (mut app, _event_tx, action_rx) = test_app();
        app.state.recommend.open();
        // Nothing picked yet: submission must fail inline.
        app.submit_recommendation();

        assert!(app.state.recommend.error.is_some());
        assert!(app.state.recommend.open);
        assert!(action_rx.try_recv().is_err(), "no action may be sent");
        assert!(app.state.transcript.is_fresh());
    }

    #[test]
    fn test_chat_submission_is_serialized() {
        let (mut app, _event_tx, action_rx) = test_app();
        app.chat_input = "first question".to_string();
        app.submit_chat();
        assert!(app.state.transcript.is_in_flight());
        assert!(matches!(
            action_rx.try_recv().unwrap(),
            BackendAction::Chat { .. }
        ));

        // A second submission while the reply is pending is refused.
        app.chat_input = "second question".to_string();
        app.submit_chat();
        assert!(action_rx.try_recv().is_err());
        assert_eq!(app.chat_input, "second question");

        // Retry is refused while in flight, too.
        app.retry_reply(0);
        assert!(action_rx.try_recv().is_err());
    }
}
