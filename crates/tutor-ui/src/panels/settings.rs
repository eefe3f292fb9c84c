//! Settings panel — LLM provider config, API key, document attachment policy.
//! Changes stay local until the user clicks Apply.

use egui::{self, RichText, Vec2};
use tutor_types::config::{AttachPolicy, LlmProvider, TutorConfig};

use crate::theme::*;

/// What the caller should do after rendering the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    /// Nothing changed
    None,
    /// A field was edited
    Changed,
    /// The user clicked Apply
    ApplyClicked,
}

/// Apply feedback passed in from the app layer
#[derive(Debug, Clone)]
pub struct SaveFeedback {
    pub message: String,
    pub success: bool,
}

/// Switch provider, replacing the model name when it was the old default.
pub fn select_provider(config: &mut TutorConfig, provider: LlmProvider) {
    let old_default = config.llm.provider.default_model().to_string();
    if config.llm.model.trim().is_empty() || config.llm.model == old_default {
        config.llm.model = provider.default_model().to_string();
    }
    config.llm.provider = provider;
}

/// Render the settings panel. Returns an action for the caller to handle.
pub fn settings_panel(
    ui: &mut egui::Ui,
    config: &mut TutorConfig,
    feedback: Option<&SaveFeedback>,
) -> SettingsAction {
    let mut changed = false;
    let mut apply_clicked = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(TEXT_PRIMARY));
            ui.separator();

            // ── LLM Section ──────────────────────────────────
            ui.label(RichText::new("Tutor model").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Provider").color(TEXT_SECONDARY).small());
            let mut provider = config.llm.provider.clone();
            egui::ComboBox::from_id_salt("llm_provider")
                .selected_text(provider.label())
                .show_ui(ui, |ui| {
                    for p in LlmProvider::all() {
                        ui.selectable_value(&mut provider, p.clone(), p.label());
                    }
                });
            if provider != config.llm.provider {
                select_provider(config, provider);
                changed = true;
            }

            ui.add_space(4.0);

            ui.label(RichText::new("Model").color(TEXT_SECONDARY).small());
            if ui.text_edit_singleline(&mut config.llm.model).changed() {
                changed = true;
            }

            ui.add_space(4.0);

            // API Key (masked)
            ui.label(RichText::new("API Key").color(TEXT_SECONDARY).small());
            let api_key_edit = egui::TextEdit::singleline(&mut config.llm.api_key)
                .password(true)
                .hint_text("paste key");
            if ui.add(api_key_edit).changed() {
                changed = true;
            }

            ui.add_space(4.0);

            ui.label(RichText::new("API Base URL (optional)").color(TEXT_SECONDARY).small());
            let mut base_url = config.llm.api_base.clone().unwrap_or_default();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut base_url)
                        .hint_text(config.llm.provider.default_base_url()),
                )
                .changed()
            {
                config.llm.api_base = if base_url.trim().is_empty() {
                    None
                } else {
                    Some(base_url)
                };
                changed = true;
            }

            ui.add_space(4.0);

            ui.label(RichText::new("Temperature").color(TEXT_SECONDARY).small());
            if ui
                .add(egui::Slider::new(&mut config.llm.temperature, 0.0..=2.0))
                .changed()
            {
                changed = true;
            }

            ui.label(RichText::new("Max Tokens").color(TEXT_SECONDARY).small());
            if ui
                .add(egui::Slider::new(&mut config.llm.max_tokens, 256..=32768))
                .changed()
            {
                changed = true;
            }

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(4.0);

            // ── Document Section ─────────────────────────────
            ui.label(RichText::new("Document").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Send PDF").color(TEXT_SECONDARY).small());
            egui::ComboBox::from_id_salt("attach_policy")
                .selected_text(config.attach_policy.label())
                .show_ui(ui, |ui| {
                    for policy in AttachPolicy::all() {
                        if ui
                            .selectable_value(&mut config.attach_policy, *policy, policy.label())
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });

            ui.add_space(4.0);
            ui.label(
                RichText::new(policy_description(config.attach_policy))
                    .color(TEXT_SECONDARY)
                    .small()
                    .italics(),
            );

            // ── Apply Button ─────────────────────────────────
            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn = ui.add(
                    egui::Button::new(RichText::new("Apply").color(TEXT_PRIMARY).strong())
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(120.0, 28.0)),
                );
                if btn.clicked() {
                    apply_clicked = true;
                }

                if let Some(fb) = feedback {
                    let color = if fb.success { SUCCESS } else { ERROR };
                    ui.label(RichText::new(&fb.message).color(color).small());
                }
            });
        });

    if apply_clicked {
        SettingsAction::ApplyClicked
    } else if changed {
        SettingsAction::Changed
    } else {
        SettingsAction::None
    }
}

fn policy_description(policy: AttachPolicy) -> &'static str {
    match policy {
        AttachPolicy::UntilDelivered => {
            "The PDF goes out with your questions until the tutor has answered one of them."
        }
        AttachPolicy::Always => "The PDF goes out with every question. Slower, but the tutor never loses it.",
    }
}
