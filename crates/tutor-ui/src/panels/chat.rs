//! Chat panel — transcript, visualizations and the question box.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use tutor_types::message::{Message, Role};
use tutor_types::session::Session;

use crate::state::{format_time, StatusTone, UiState};
use crate::theme::*;
use crate::visualizer::visualization_card;

const DISCLAIMER: &str = "DocuTutor can make mistakes. Verify important information.";

/// Render the chat panel. Returns Some(question) when the user submits input.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState, session: &Session) -> Option<String> {
    let mut submitted = None;
    let busy = !session.phase.is_idle();

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Tutor Chat").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = match state.status_tone {
                            StatusTone::Ready => SUCCESS,
                            StatusTone::Busy => WARNING,
                            StatusTone::Warning => WARNING,
                            StatusTone::Error => ERROR,
                        };
                        ui.label(RichText::new(&state.status_text).color(status_color).small());
                    });
                });

                ui.separator();

                // Messages area
                let available_height = ui.available_height() - 84.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for msg in &session.transcript {
                            render_message(ui, msg);
                            ui.add_space(6.0);
                        }

                        if session.reply_in_flight() {
                            egui::Frame::default()
                                .fill(TUTOR_BUBBLE)
                                .corner_radius(BUBBLE_ROUNDING)
                                .inner_margin(10.0)
                                .show(ui, |ui| {
                                    ui.horizontal(|ui| {
                                        ui.spinner();
                                        ui.label(
                                            RichText::new("Tutor is thinking...")
                                                .color(TEXT_SECONDARY)
                                                .italics(),
                                        );
                                    });
                                });
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let hint = if session.active_document.is_some() {
                        "Ask your tutor about the document..."
                    } else {
                        "Upload a PDF to start tutoring..."
                    };
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text(hint)
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add(input);

                    let send_enabled = !state.input_text.trim().is_empty() && !busy;
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (enter && send_enabled) || send_btn.clicked() {
                        submitted = Some(state.input_text.trim().to_string());
                        state.input_text.clear();
                        response.request_focus();
                    }
                });

                ui.add_space(4.0);
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(DISCLAIMER).color(TEXT_SECONDARY).small());
                });
            });
        });

    submitted
}

fn render_message(ui: &mut egui::Ui, msg: &Message) {
    match msg.role {
        Role::System => {
            ui.vertical_centered(|ui| {
                egui::Frame::default()
                    .fill(SYSTEM_PILL)
                    .corner_radius(BUBBLE_ROUNDING)
                    .inner_margin(Vec2::new(10.0, 3.0))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(msg.content.to_uppercase())
                                .color(TEXT_SECONDARY)
                                .small()
                                .strong(),
                        );
                    });
                timestamp(ui, msg);
            });
        }
        Role::User => {
            ui.with_layout(Layout::top_down(Align::Max), |ui| {
                bubble(ui, msg, USER_BUBBLE);
                timestamp(ui, msg);
            });
        }
        Role::Tutor => {
            ui.with_layout(Layout::top_down(Align::Min), |ui| {
                bubble(ui, msg, TUTOR_BUBBLE);
                timestamp(ui, msg);
            });
        }
    }
}

fn bubble(ui: &mut egui::Ui, msg: &Message, fill: egui::Color32) {
    let max_width = ui.available_width() * 0.85;
    egui::Frame::default()
        .fill(fill)
        .corner_radius(BUBBLE_ROUNDING)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_max_width(max_width);
            let label_color = if msg.role == Role::User { TEXT_PRIMARY } else { ACCENT };
            ui.label(RichText::new(msg.role.label()).color(label_color).strong().small());
            ui.label(RichText::new(&msg.content).color(TEXT_PRIMARY));

            if let Some(vis) = &msg.visualization {
                ui.add_space(8.0);
                visualization_card(ui, vis);
            }
        });
}

fn timestamp(ui: &mut egui::Ui, msg: &Message) {
    ui.label(
        RichText::new(format_time(&msg.created_at))
            .color(TEXT_SECONDARY)
            .size(10.0),
    );
}
