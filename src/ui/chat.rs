//! Chat view: transcript bubbles, suggestion prompts, the guided
//! recommendation form and the message input.

use eframe::egui::{self, RichText};

use crate::recommend::{departments_of, RecommendForm, Semester, Year, CATALOG, PILOT_DEPARTMENT};
use crate::transcript::{MessageKind, Role, Transcript};
use crate::ui::theme::BiblioTheme;

pub const HOURS_QUESTION: &str = "What are the library's opening hours?";
pub const LOAN_QUESTION: &str = "How long can I borrow books for?";
pub const HOMEPAGE_URL: &str = "https://library.example.edu/";

pub enum ChatAction {
    Back,
    /// Send the free-text input.
    Submit,
    /// Retry the failed reply at this transcript index.
    Retry(usize),
    /// Send one of the canned suggestion prompts.
    Ask(&'static str),
    OpenRecommend,
    SubmitRecommend,
    CloseRecommend,
}

/// Render the whole chat view. Returns the action the user took, if any.
pub fn render_chat(
    ctx: &egui::Context,
    input: &mut String,
    transcript: &Transcript,
    form: &mut RecommendForm,
) -> Option<ChatAction> {
    let mut action = None;

    egui::TopBottomPanel::top("chat_header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            if ui.button("← Back").clicked() {
                action = Some(ChatAction::Back);
            }
            ui.heading("Biblio Assistant");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme = BiblioTheme::current(ui);
                ui.label(
                    RichText::new("Chat with the assistant for book recommendations")
                        .color(theme.text_muted),
                );
            });
        });
    });

    egui::TopBottomPanel::bottom("chat_input").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(input)
                    .desired_width(ui.available_width() - 70.0)
                    .hint_text("Type a message..."),
            );
            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            // Sending is refused while a reply is in flight: one reply at
            // a time.
            let can_send = !transcript.is_in_flight() && !input.trim().is_empty();
            let clicked = ui.add_enabled(can_send, egui::Button::new("Send")).clicked();
            if can_send && (clicked || enter) {
                action = Some(ChatAction::Submit);
                response.request_focus();
            }
        });
        ui.add_space(4.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add_space(8.0);
                for (index, message) in transcript.messages().iter().enumerate() {
                    render_message(ui, index, message, transcript, &mut action);
                    ui.add_space(6.0);
                }

                if transcript.is_fresh() && !form.open {
                    render_suggestions(ui, &mut action);
                }
                if form.open {
                    render_recommend_form(ui, form, &mut action);
                }
                ui.add_space(8.0);
            });
    });

    action
}

fn render_message(
    ui: &mut egui::Ui,
    index: usize,
    message: &crate::transcript::ChatMessage,
    transcript: &Transcript,
    action: &mut Option<ChatAction>,
) {
    let theme = BiblioTheme::current(ui);
    match message.role {
        Role::User => {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                bubble(ui, theme.bubble_user, |ui| {
                    ui.label(RichText::new(&message.content).color(theme.text_primary));
                    ui.label(
                        RichText::new(&message.timestamp)
                            .size(10.0)
                            .color(theme.text_muted),
                    );
                });
            });
        }
        Role::Assistant => match message.kind {
            MessageKind::Typing => {
                // Animated ellipsis; the periodic repaint keeps it moving.
                let dots = 1 + (ui.input(|i| i.time) * 2.0) as usize % 3;
                bubble(ui, theme.bubble_assistant, |ui| {
                    ui.label(RichText::new(".".repeat(dots)).strong());
                    ui.label(
                        RichText::new(&message.timestamp)
                            .size(10.0)
                            .color(theme.text_muted),
                    );
                });
            }
            MessageKind::Error => {
                bubble(ui, theme.bubble_error, |ui| {
                    ui.label(RichText::new(&message.content).color(theme.danger));
                    if ui
                        .add_enabled(!transcript.is_in_flight(), egui::Button::new("Retry"))
                        .clicked()
                    {
                        *action = Some(ChatAction::Retry(index));
                    }
                    ui.label(
                        RichText::new(&message.timestamp)
                            .size(10.0)
                            .color(theme.text_muted),
                    );
                });
            }
            MessageKind::Text => {
                bubble(ui, theme.bubble_assistant, |ui| {
                    ui.label(RichText::new(&message.content).color(theme.text_primary));
                    ui.label(
                        RichText::new(&message.timestamp)
                            .size(10.0)
                            .color(theme.text_muted),
                    );
                });
            }
        },
    }
}

fn bubble(ui: &mut egui::Ui, fill: egui::Color32, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::new()
        .fill(fill)
        .corner_radius(8)
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.set_max_width(ui.available_width() * 0.75);
            ui.vertical(add_contents);
        });
}

fn render_suggestions(ui: &mut egui::Ui, action: &mut Option<ChatAction>) {
    let theme = BiblioTheme::current(ui);
    ui.add_space(12.0);
    ui.label(RichText::new("Try one of these to get started:").color(theme.text_muted));
    ui.horizontal_wrapped(|ui| {
        if ui.button("📚 Recommend a book").clicked() {
            *action = Some(ChatAction::OpenRecommend);
        }
        if ui.button("⏰ Opening hours").clicked() {
            *action = Some(ChatAction::Ask(HOURS_QUESTION));
        }
        if ui.button("📦 Loan period").clicked() {
            *action = Some(ChatAction::Ask(LOAN_QUESTION));
        }
        // Plain link: opens the browser, never touches the transcript.
        ui.hyperlink_to("🌐 Library homepage", HOMEPAGE_URL);
    });
}

fn render_recommend_form(ui: &mut egui::Ui, form: &mut RecommendForm, action: &mut Option<ChatAction>) {
    let theme = BiblioTheme::current(ui);
    ui.add_space(12.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.label(RichText::new("What should I base the recommendation on?").strong());
        ui.label(RichText::new("Pick every field, then submit.").color(theme.text_muted));
        ui.add_space(6.0);

        egui::ComboBox::from_label("Year")
            .selected_text(form.year.map(Year::label).unwrap_or("Select year"))
            .show_ui(ui, |ui| {
                for year in Year::ALL {
                    ui.selectable_value(&mut form.year, Some(year), year.label());
                }
            });

        if form.year == Some(Year::First) {
            // 1st-years pick a classification code instead of an
            // affiliation.
            ui.horizontal(|ui| {
                ui.label("Classification code:");
                ui.add(
                    egui::TextEdit::singleline(&mut form.classification)
                        .desired_width(120.0)
                        .hint_text("e.g. 813.7"),
                );
            });
        } else if form.year.is_some() {
            let college_text = form
                .college
                .clone()
                .unwrap_or_else(|| "Select college".to_string());
            let mut picked_college = None;
            egui::ComboBox::from_label("College")
                .selected_text(college_text)
                .show_ui(ui, |ui| {
                    for college in CATALOG.iter() {
                        let selected = form.college.as_deref() == Some(college.name);
                        if ui.selectable_label(selected, college.name).clicked() {
                            picked_college = Some(college.name);
                        }
                    }
                });
            if let Some(name) = picked_college {
                form.set_college(name);
            }

            if let Some(college) = form.college.clone() {
                egui::ComboBox::from_label("Department")
                    .selected_text(
                        form.department
                            .clone()
                            .unwrap_or_else(|| "Select department".to_string()),
                    )
                    .show_ui(ui, |ui| {
                        for department in departments_of(&college) {
                            let selected = form.department.as_deref() == Some(*department);
                            // Only the pilot department is selectable; the
                            // rest are listed but disabled.
                            let enabled = *department == PILOT_DEPARTMENT;
                            if ui
                                .add_enabled(
                                    enabled,
                                    egui::SelectableLabel::new(selected, *department),
                                )
                                .clicked()
                            {
                                form.department = Some(department.to_string());
                            }
                        }
                    });
            }
        }

        egui::ComboBox::from_label("Semester")
            .selected_text(form.semester.map(Semester::label).unwrap_or("Select semester"))
            .show_ui(ui, |ui| {
                for semester in Semester::ALL {
                    ui.selectable_value(&mut form.semester, Some(semester), semester.label());
                }
            });

        if let Some(error) = &form.error {
            ui.label(RichText::new(error).color(theme.danger));
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("📖 Get a recommendation").clicked() {
                *action = Some(ChatAction::SubmitRecommend);
            }
            if ui.button("Cancel").clicked() {
                *action = Some(ChatAction::CloseRecommend);
            }
        });
    });
}
