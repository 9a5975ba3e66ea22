//! Interview panel — conversation history, the current question, and the
//! answer input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use crate::state::UiState;
use crate::theme::*;

/// Render the interview panel. Returns Some(answer) when the user submits
/// a response. Blank input never submits; the field just stays focused.
pub fn interview_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<String> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(
                        RichText::new("Conversation History")
                            .color(TEXT_PRIMARY)
                            .strong(),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if state.is_busy() { WARNING } else { SUCCESS };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                        if state.is_busy() {
                            ui.spinner();
                        }
                    });
                });

                ui.separator();

                // History + current question
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for entry in &state.entries {
                            render_entry(ui, entry);
                            ui.add_space(4.0);
                        }

                        if let Some(q) = &state.current_question {
                            bubble(ui, INTERVIEWER_BG, |ui| {
                                ui.label(
                                    RichText::new("Interviewer")
                                        .color(TEXT_SECONDARY)
                                        .strong()
                                        .small(),
                                );
                                ui.label(
                                    RichText::new(format!("Question {}: {}", q.number, q.text))
                                        .color(TEXT_PRIMARY),
                                );
                            });
                        }
                    });

                ui.add_space(8.0);

                // Input area — only while a question is pending
                if state.current_question.is_some() {
                    ui.horizontal(|ui| {
                        let input = egui::TextEdit::singleline(&mut state.input_text)
                            .hint_text("Your response:")
                            .desired_width(ui.available_width() - 110.0)
                            .font(egui::FontId::proportional(14.0));

                        let response = ui.add(input);

                        let submit_btn = ui.add(
                            egui::Button::new(
                                RichText::new("Submit Response").color(BG_SURFACE),
                            )
                            .fill(ACCENT)
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(100.0, 0.0)),
                        );

                        let enter_pressed = response.lost_focus()
                            && ui.input(|i| i.key_pressed(egui::Key::Enter));

                        // Blank submissions are silently ignored
                        if (enter_pressed || submit_btn.clicked())
                            && !state.input_text.trim().is_empty()
                        {
                            submitted = Some(state.input_text.trim().to_string());
                            state.input_text.clear();
                            response.request_focus();
                        }
                    });
                }
            });
        });

    submitted
}

fn render_entry(ui: &mut egui::Ui, entry: &crate::state::ChatEntry) {
    let (label, bg) = match entry.role.as_str() {
        "interviewer" => ("Interviewer", INTERVIEWER_BG),
        "user" => ("You", USER_BG),
        "profile" => ("Psychological Profile Summary", PROFILE_BG),
        "error" => ("Error", ERROR_BG),
        _ => ("???", BG_SECONDARY),
    };

    bubble(ui, bg, |ui| {
        ui.label(
            RichText::new(label)
                .color(TEXT_SECONDARY)
                .strong()
                .small(),
        );
        ui.label(RichText::new(&entry.content).color(TEXT_PRIMARY));
    });
}

fn bubble(ui: &mut egui::Ui, fill: egui::Color32, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::default()
        .fill(fill)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(10.0)
        .show(ui, add_contents);
}
