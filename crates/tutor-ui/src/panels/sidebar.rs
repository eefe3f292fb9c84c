//! Document sidebar — current PDF and the upload button.

use egui::{self, RichText, Vec2};
use tutor_types::session::{Session, SessionPhase};

use crate::state::format_size;
use crate::theme::*;

const STRATEGIES: [&str; 3] = [
    "Concept Summarization",
    "Visual Data Comparisons",
    "Socratic Questioning",
];

/// What the caller should do after rendering the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    None,
    /// Open the file picker
    UploadClicked,
}

pub fn document_panel(ui: &mut egui::Ui, session: &Session) -> SidebarAction {
    let mut action = SidebarAction::None;
    let idle = session.phase.is_idle();

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("DocuTutor").color(ACCENT).strong());
            ui.label(
                RichText::new("Interactive Learning Environment")
                    .color(TEXT_SECONDARY)
                    .small(),
            );
            ui.separator();

            ui.label(RichText::new("CURRENT SESSION").color(TEXT_SECONDARY).small().strong());
            ui.add_space(4.0);

            egui::Frame::default()
                .fill(BG_SURFACE)
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());

                    if let SessionPhase::Uploading { file_name } = &session.phase {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label(RichText::new(format!("Reading {}", file_name)).color(TEXT_PRIMARY));
                        });
                        return;
                    }

                    let button_text = match &session.active_document {
                        Some(doc) => {
                            ui.label(RichText::new(&doc.name).color(TEXT_PRIMARY).strong());
                            let delivery = if doc.delivered {
                                "Shared with the tutor"
                            } else {
                                "Sent with your next question"
                            };
                            ui.label(
                                RichText::new(format!("{} · {}", format_size(doc.size_bytes), delivery))
                                    .color(TEXT_SECONDARY)
                                    .small(),
                            );
                            ui.add_space(4.0);
                            "Change document"
                        }
                        None => {
                            ui.label(RichText::new("No document yet").color(TEXT_SECONDARY).italics());
                            ui.add_space(4.0);
                            "Upload PDF to start"
                        }
                    };

                    let btn = ui.add_enabled(
                        idle,
                        egui::Button::new(RichText::new(button_text).color(TEXT_PRIMARY))
                            .fill(ACCENT)
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(140.0, 26.0)),
                    );
                    if btn.clicked() {
                        action = SidebarAction::UploadClicked;
                    }
                });

            ui.add_space(12.0);
            ui.label(RichText::new("Tutor Strategies").color(TEXT_PRIMARY).small().strong());
            for strategy in STRATEGIES {
                ui.label(
                    RichText::new(format!("✔ {}", strategy))
                        .color(TEXT_SECONDARY)
                        .small(),
                );
            }
        });

    action
}
