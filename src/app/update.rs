//! Main update loop and view routing

use eframe::egui::{self, RichText};
use std::time::Duration;

use super::BiblioApp;
use crate::state::View;
use crate::ui;
use crate::ui::admin::{LoginAction, ScanAction};
use crate::ui::chat::ChatAction;
use crate::ui::search::SearchAction;
use crate::ui::theme::BiblioTheme;

impl eframe::App for BiblioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process network events
        self.process_events();

        // Request repaint to keep draining events and animating the
        // typing indicator.
        ctx.request_repaint_after(Duration::from_millis(100));
        self.state.purge_old_status_messages(4);
        self.maybe_poll_robot();

        match self.state.view {
            View::Home => self.render_home(ctx),
            View::Chat => self.render_chat_view(ctx),
            View::AdminLogin => self.render_admin_login_view(ctx),
            View::Admin => self.render_admin_view(ctx),
        }

        let cancel_requested = self
            .state
            .guide
            .as_ref()
            .is_some_and(|run| ui::search::render_guide_modal(ctx, run));
        if cancel_requested {
            self.cancel_guide();
        }

        ui::toasts::render_status_toasts(ctx, &self.state.status_messages);
    }
}

impl BiblioApp {
    fn render_home(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("home_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("📚 Biblio");
                let theme = BiblioTheme::current(ui);
                ui.label(RichText::new("library search").color(theme.text_muted));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("🔧 Admin").clicked() {
                        self.state.view = if self.auth.is_admin() {
                            View::Admin
                        } else {
                            View::AdminLogin
                        };
                    }
                    if ui.button("💬 Assistant").clicked() {
                        self.state.open_chat();
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let search_action =
                ui::search::render_search(ui, &mut self.search_input, &self.state.search);
            self.handle_search_action(search_action);
        });
    }

    fn render_chat_view(&mut self, ctx: &egui::Context) {
        let action = ui::chat::render_chat(
            ctx,
            &mut self.chat_input,
            &self.state.transcript,
            &mut self.state.recommend,
        );
        match action {
            Some(ChatAction::Back) => self.state.close_chat(&self.gate),
            Some(ChatAction::Submit) => self.submit_chat(),
            Some(ChatAction::Retry(index)) => self.retry_reply(index),
            Some(ChatAction::Ask(question)) => self.ask_suggested(question),
            Some(ChatAction::OpenRecommend) => self.state.recommend.open(),
            Some(ChatAction::SubmitRecommend) => self.submit_recommendation(),
            Some(ChatAction::CloseRecommend) => self.state.recommend.close(),
            None => {}
        }
    }

    fn render_admin_login_view(&mut self, ctx: &egui::Context) {
        let action =
            ui::admin::render_admin_login(ctx, &mut self.admin_code_input, &self.auth_error);
        match action {
            Some(LoginAction::Submit) => self.admin_login(),
            Some(LoginAction::Cancel) => {
                self.auth_error = None;
                self.admin_code_input.clear();
                self.state.view = View::Home;
            }
            None => {}
        }
    }

    fn render_admin_view(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("admin_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("📚 Biblio");
                let theme = BiblioTheme::current(ui);
                ui.label(RichText::new("admin").color(theme.warning));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Log out").clicked() {
                        self.admin_logout();
                    }
                    if ui.button("← Back").clicked() {
                        self.state.view = View::Home;
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let search_action =
                ui::search::render_search(ui, &mut self.search_input, &self.state.search);
            self.handle_search_action(search_action);

            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            match ui::admin::render_scan_controls(ui, &self.state.scan) {
                Some(ScanAction::Start) => self.start_scan(),
                Some(ScanAction::Stop) => self.stop_scan(),
                Some(ScanAction::ResetRobot) => self.reset_robot(),
                None => {}
            }
        });
    }

    fn handle_search_action(&mut self, action: Option<SearchAction>) {
        match action {
            Some(SearchAction::Submit) => self.do_search(),
            Some(SearchAction::Clear) => self.clear_search(),
            Some(SearchAction::Guide(index)) => {
                if let Some(book) = self.state.search.results.get(index).cloned() {
                    self.guide_to(&book);
                }
            }
            None => {}
        }
    }
}
