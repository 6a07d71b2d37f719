//! Search bar, result cards and the book-guidance modal.
//!
//! Shared by the Home and Admin views.

use eframe::egui::{self, RichText};

use crate::state::{GuideRun, SearchState};
use crate::ui::theme::BiblioTheme;

pub enum SearchAction {
    Submit,
    Clear,
    /// "Guide me" on the result at this index.
    Guide(usize),
}

/// Render the search surface into the current panel. Returns the action
/// the user took, if any.
pub fn render_search(
    ui: &mut egui::Ui,
    input: &mut String,
    search: &SearchState,
) -> Option<SearchAction> {
    let theme = BiblioTheme::current(ui);
    let mut action = None;

    ui.horizontal(|ui| {
        let response = ui.add_enabled(
            !search.is_searching,
            egui::TextEdit::singleline(input)
                .desired_width(ui.available_width() - 170.0)
                .hint_text("Search by title or author..."),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui
            .add_enabled(!search.is_searching, egui::Button::new("Search"))
            .clicked();
        if (enter || clicked) && !input.trim().is_empty() {
            action = Some(SearchAction::Submit);
        }
        if search.has_searched && ui.button("Clear results").clicked() {
            action = Some(SearchAction::Clear);
        }
    });

    if search.is_searching {
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("Searching...").color(theme.text_muted));
        });
        return action;
    }

    if let Some(error) = &search.error {
        ui.add_space(8.0);
        ui.label(RichText::new(error).color(theme.danger));
        return action;
    }

    if search.has_searched {
        ui.add_space(8.0);
        if search.results.is_empty() {
            ui.label(RichText::new("No books found.").color(theme.text_muted));
            ui.label(RichText::new("Try a different search term.").color(theme.text_muted));
        } else {
            ui.heading(format!("Results ({})", search.results.len()));
            ui.add_space(4.0);
            egui::ScrollArea::vertical()
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for (index, book) in search.results.iter().enumerate() {
                        egui::Frame::group(ui.style()).show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(
                                        RichText::new(&book.title)
                                            .size(15.0)
                                            .strong()
                                            .color(theme.text_primary),
                                    );
                                    ui.label(format!("Author: {}", book.author));
                                    ui.label(format!("Location: {}", book.location));
                                    if let Some(call_number) = &book.call_number {
                                        ui.label(format!("Call number: {}", call_number));
                                    }
                                    ui.label(
                                        RichText::new(format!("Barcode: {}", book.barcode))
                                            .size(11.0)
                                            .color(theme.text_muted),
                                    );
                                });
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Min),
                                    |ui| {
                                        let placement = book.placement();
                                        ui.label(
                                            RichText::new(placement.label())
                                                .color(theme.placement_color(placement))
                                                .strong(),
                                        );
                                        if ui.button("Guide me").clicked() {
                                            action = Some(SearchAction::Guide(index));
                                        }
                                    },
                                );
                            });
                        });
                        ui.add_space(6.0);
                    }
                });
        }
    }

    action
}

/// The waiting modal while the robot walks to a book. Returns true when
/// the user asked to cancel.
pub fn render_guide_modal(ctx: &egui::Context, guide: &GuideRun) -> bool {
    let mut cancel = false;
    egui::Window::new("Book guidance")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(format!(
                "The robot is on its way to \"{}\". Please follow it.",
                guide.title
            ));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.spinner();
                if ui
                    .add_enabled(!guide.pending, egui::Button::new("Cancel"))
                    .clicked()
                {
                    cancel = true;
                }
            });
        });
    cancel
}
