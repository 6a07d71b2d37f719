//! Transient status toasts, bottom-right corner.

use std::time::Instant;

use eframe::egui::{self, RichText};

pub fn render_status_toasts(ctx: &egui::Context, messages: &[(String, Instant)]) {
    if messages.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("status_toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
        .show(ctx, |ui| {
            for (message, _) in messages {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(RichText::new(message).size(13.0));
                });
                ui.add_space(4.0);
            }
        });
}
