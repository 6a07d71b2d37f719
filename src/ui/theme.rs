//! Color schemes and styling utilities.

use eframe::egui::{self, Color32};

use crate::models::Placement;

pub struct BiblioTheme {
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub danger: Color32,
    pub info: Color32,
    pub bubble_user: Color32,
    pub bubble_assistant: Color32,
    pub bubble_error: Color32,
}

impl BiblioTheme {
    pub fn dark() -> Self {
        Self {
            text_primary: Color32::from_rgb(230, 230, 235),
            text_muted: Color32::from_rgb(140, 145, 155),
            accent: Color32::from_rgb(92, 140, 250),
            success: Color32::from_rgb(80, 190, 120),
            warning: Color32::from_rgb(230, 180, 60),
            danger: Color32::from_rgb(225, 95, 95),
            info: Color32::from_rgb(150, 120, 230),
            bubble_user: Color32::from_rgb(50, 75, 130),
            bubble_assistant: Color32::from_rgb(45, 48, 56),
            bubble_error: Color32::from_rgb(80, 42, 42),
        }
    }

    pub fn light() -> Self {
        Self {
            text_primary: Color32::from_rgb(35, 35, 40),
            text_muted: Color32::from_rgb(115, 120, 130),
            accent: Color32::from_rgb(50, 95, 200),
            success: Color32::from_rgb(35, 140, 80),
            warning: Color32::from_rgb(190, 140, 25),
            danger: Color32::from_rgb(190, 55, 55),
            info: Color32::from_rgb(115, 80, 200),
            bubble_user: Color32::from_rgb(210, 225, 250),
            bubble_assistant: Color32::from_rgb(238, 238, 242),
            bubble_error: Color32::from_rgb(248, 222, 222),
        }
    }

    pub fn current(ui: &egui::Ui) -> Self {
        if ui.style().visuals.dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn placement_color(&self, placement: Placement) -> Color32 {
        match placement {
            Placement::OnShelf => self.success,
            Placement::WrongLocation => self.info,
            Placement::OutOfOrder => self.warning,
            Placement::Missing => self.danger,
        }
    }
}

/// Shared widget styling tweaks applied once at startup.
pub fn apply_app_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    ctx.set_style(style);
}
