//! Admin gate and scan control panel.

use eframe::egui::{self, RichText};

use crate::models::RobotStatus;
use crate::state::ScanState;
use crate::ui::theme::BiblioTheme;

pub enum LoginAction {
    Submit,
    Cancel,
}

/// The admin code prompt, shown as a centered modal over an empty panel.
pub fn render_admin_login(
    ctx: &egui::Context,
    code_input: &mut String,
    error: &Option<String>,
) -> Option<LoginAction> {
    let mut action = None;

    egui::CentralPanel::default().show(ctx, |_ui| {});
    egui::Window::new("🔐 Admin access")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            let theme = BiblioTheme::current(ui);
            ui.label("Enter the access code to open the admin panel.");
            ui.add_space(6.0);

            let response = ui.add(
                egui::TextEdit::singleline(code_input)
                    .password(true)
                    .hint_text("Access code"),
            );
            if ui.memory(|m| m.focused().is_none()) {
                response.request_focus();
            }
            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if let Some(error) = error {
                ui.label(RichText::new(error).color(theme.danger));
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Confirm").clicked() || enter {
                    action = Some(LoginAction::Submit);
                }
                if ui.button("Cancel").clicked() {
                    action = Some(LoginAction::Cancel);
                }
            });
        });

    action
}

pub enum ScanAction {
    Start,
    Stop,
    ResetRobot,
}

/// Scan controls and robot state, rendered inside the admin view.
pub fn render_scan_controls(ui: &mut egui::Ui, scan: &ScanState) -> Option<ScanAction> {
    let theme = BiblioTheme::current(ui);
    let mut action = None;

    ui.heading("Shelf scan");
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.label("Robot:");
        let color = match scan.robot {
            RobotStatus::Normal => theme.text_muted,
            RobotStatus::Scanning => theme.warning,
            RobotStatus::Complete => theme.success,
        };
        ui.label(RichText::new(scan.robot.label()).color(color).strong());
    });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let idle = !scan.pending;
        if ui
            .add_enabled(idle && !scan.scanning, egui::Button::new("▶ Start scan"))
            .clicked()
        {
            action = Some(ScanAction::Start);
        }
        if ui
            .add_enabled(idle && scan.scanning, egui::Button::new("■ Stop scan"))
            .clicked()
        {
            action = Some(ScanAction::Stop);
        }
        if scan.robot == RobotStatus::Complete
            && ui.add_enabled(idle, egui::Button::new("Reset robot")).clicked()
        {
            action = Some(ScanAction::ResetRobot);
        }
    });

    if scan.pending {
        ui.label(RichText::new("Waiting for the robot...").color(theme.text_muted));
    }

    action
}
