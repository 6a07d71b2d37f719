//! Core BiblioApp struct, initialization and the action helpers the view
//! handlers call into.

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;

use crate::api::{ApiClient, ApiError};
use crate::auth::AuthState;
use crate::backend::run_backend;
use crate::config::{load_settings, Settings};
use crate::models::{Book, RobotStatus};
use crate::protocol::{BackendAction, GuiEvent, RevealGate};
use crate::state::{ClientState, GuideRun, View};

/// Robot state poll cadence while a scan is running.
const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(2);

pub struct BiblioApp {
    // Core state (views, search, scan, transcript, etc.)
    pub state: ClientState,

    // Admin gate, restored from the persisted session marker
    pub auth: AuthState,

    pub settings: Settings,

    // Channels for backend communication
    pub action_tx: Sender<BackendAction>,
    pub event_rx: Receiver<GuiEvent>,

    // Cancellation handle for the reveal ticking
    pub gate: RevealGate,

    // Form inputs
    pub search_input: String,
    pub chat_input: String,
    pub admin_code_input: String,
    pub auth_error: Option<String>,

    pub(super) last_status_poll: Option<Instant>,
}

impl BiblioApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, ApiError> {
        let settings = load_settings().unwrap_or_default();
        match settings.theme.as_str() {
            "dark" => cc.egui_ctx.set_visuals(egui::Visuals::dark()),
            _ => cc.egui_ctx.set_visuals(egui::Visuals::light()),
        }
        crate::ui::theme::apply_app_style(&cc.egui_ctx);

        // Create channels for UI <-> Backend
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();
        let gate = RevealGate::new();

        // Spawn the backend thread
        let client = ApiClient::new(&settings.api_base)?;
        let backend_gate = gate.clone();
        thread::spawn(move || {
            run_backend(client, action_rx, event_tx, backend_gate);
        });

        Ok(Self {
            state: ClientState::new(),
            auth: AuthState::restore(),
            settings,

            action_tx,
            event_rx,
            gate,

            search_input: String::new(),
            chat_input: String::new(),
            admin_code_input: String::new(),
            auth_error: None,

            last_status_poll: None,
        })
    }

    // ---- search ----

    pub(super) fn do_search(&mut self) {
        let query = self.search_input.trim().to_string();
        if query.is_empty() || self.state.search.is_searching {
            return;
        }
        self.state.search.is_searching = true;
        self.state.search.has_searched = true;
        self.state.search.error = None;
        let _ = self.action_tx.send(BackendAction::Search { query });
    }

    pub(super) fn clear_search(&mut self) {
        self.state.search.clear();
        self.search_input.clear();
    }

    pub(super) fn guide_to(&mut self, book: &Book) {
        if self.state.guide.is_some() {
            return;
        }
        self.state.guide = Some(GuideRun {
            barcode: book.barcode.clone(),
            title: book.title.clone(),
            request_id: None,
            pending: true,
        });
        let _ = self.action_tx.send(BackendAction::GuideToBook {
            barcode: book.barcode.clone(),
            title: book.title.clone(),
        });
    }

    pub(super) fn cancel_guide(&mut self) {
        if let Some(run) = &mut self.state.guide {
            if run.pending {
                return;
            }
            run.pending = true;
            let _ = self.action_tx.send(BackendAction::CancelGuide {
                barcode: run.barcode.clone(),
                request_id: run.request_id.clone(),
            });
        }
    }

    // ---- chat ----

    /// Submit the free-text input as a user message and request a reply.
    /// No-op while a reply is in flight: requests are serialized.
    pub(super) fn submit_chat(&mut self) {
        if self.state.transcript.is_in_flight() {
            return;
        }
        let Some(question) = self.state.transcript.push_user(&self.chat_input) else {
            return;
        };
        self.chat_input.clear();
        self.request_reply(question);
    }

    /// One of the canned suggestion prompts.
    pub(super) fn ask_suggested(&mut self, question: &str) {
        if self.state.transcript.is_in_flight() {
            return;
        }
        if let Some(question) = self.state.transcript.push_user(question) {
            self.request_reply(question);
        }
    }

    pub(super) fn retry_reply(&mut self, index: usize) {
        if self.state.transcript.is_in_flight() {
            return;
        }
        if let Some((request, question)) = self.state.transcript.begin_retry(index) {
            self.gate.arm(request);
            let _ = self.action_tx.send(BackendAction::Chat { request, question });
        }
    }

    pub(super) fn submit_recommendation(&mut self) {
        if self.state.transcript.is_in_flight() {
            return;
        }
        match self.state.recommend.build_question() {
            Ok(question) => {
                self.state.recommend.close();
                self.state.transcript.push_user(&question);
                self.request_reply(question);
            }
            Err(message) => {
                self.state.recommend.error = Some(message);
            }
        }
    }

    fn request_reply(&mut self, question: String) {
        let request = self.state.transcript.begin_reply();
        self.gate.arm(request);
        let _ = self.action_tx.send(BackendAction::Chat { request, question });
    }

    // ---- admin ----

    pub(super) fn admin_login(&mut self) {
        let code = self.admin_code_input.clone();
        self.admin_code_input.clear();
        if self.auth.login(&code, &self.settings.admin_code) {
            self.auth_error = None;
            self.state.view = View::Admin;
        } else {
            self.auth_error = Some("Invalid admin code.".to_string());
        }
    }

    pub(super) fn admin_logout(&mut self) {
        self.auth.logout();
        self.state.view = View::Home;
        self.state.push_status("Logged out");
    }

    pub(super) fn start_scan(&mut self) {
        if self.state.scan.pending {
            return;
        }
        self.state.scan.pending = true;
        let _ = self.action_tx.send(BackendAction::StartScan);
    }

    pub(super) fn stop_scan(&mut self) {
        if self.state.scan.pending {
            return;
        }
        self.state.scan.pending = true;
        let _ = self.action_tx.send(BackendAction::StopScan);
    }

    pub(super) fn reset_robot(&mut self) {
        let _ = self
            .action_tx
            .send(BackendAction::SetRobotStatus(RobotStatus::Normal));
    }

    /// Poll the robot while the admin panel has a scan running.
    pub(super) fn maybe_poll_robot(&mut self) {
        if self.state.view != View::Admin {
            return;
        }
        if !self.state.scan.scanning && self.state.scan.robot != RobotStatus::Scanning {
            return;
        }
        let due = self
            .last_status_poll
            .map_or(true, |at| at.elapsed() >= STATUS_POLL_INTERVAL);
        if due {
            self.last_status_poll = Some(Instant::now());
            let _ = self.action_tx.send(BackendAction::FetchRobotStatus);
        }
    }
}
