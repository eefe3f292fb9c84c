//! Main egui application — composes the panels and drives the controller.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use tutor_core::controller::TutorController;
use tutor_core::event_bus::EventBus;
use tutor_core::ports::{FileSource, TutorPort};
use tutor_platform::file::pick_pdf_file;
use tutor_platform::llm::build_tutor;
use tutor_types::config::TutorConfig;
use tutor_types::event::TutorEvent;
use tutor_ui::panels::settings::{SaveFeedback, SettingsAction};
use tutor_ui::panels::sidebar::SidebarAction;
use tutor_ui::panels::{chat, settings, sidebar};
use tutor_ui::state::{StatusTone, UiState};
use tutor_ui::theme;

/// The main application state
pub struct TutorApp {
    ui_state: UiState,
    /// Working copy edited by the settings panel; applied on demand
    config: TutorConfig,
    event_bus: EventBus,
    controller: Rc<RefCell<TutorController>>,
    tutor: Rc<dyn TutorPort>,
    feedback: Option<SaveFeedback>,
    first_frame: bool,
}

impl TutorApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = TutorConfig::default();
        let event_bus = EventBus::new();
        let controller = TutorController::new(config.clone(), event_bus.clone());
        let tutor = build_tutor(&config);

        let mut ui_state = UiState::new();
        if let Err(e) = config.validate() {
            log::warn!("Starting without a usable tutor config: {}", e);
            ui_state.set_status(format!("{}. Open Settings to fix.", e), StatusTone::Warning);
            ui_state.show_settings = true;
        }

        Self {
            ui_state,
            config,
            event_bus,
            controller: Rc::new(RefCell::new(controller)),
            tutor,
            feedback: None,
            first_frame: true,
        }
    }

    fn apply_settings(&mut self) {
        match self.config.validate() {
            Ok(()) => {
                self.controller.borrow_mut().set_config(self.config.clone());
                self.tutor = build_tutor(&self.config);
                self.ui_state.set_status("Ready", StatusTone::Ready);
                self.feedback = Some(SaveFeedback {
                    message: "Applied".to_string(),
                    success: true,
                });
            }
            Err(e) => {
                self.feedback = Some(SaveFeedback {
                    message: e.to_string(),
                    success: false,
                });
            }
        }
    }
}

impl eframe::App for TutorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain events from the controller
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if self.controller.borrow().is_busy() {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("DocuTutor")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(format!(
                        "{} | {}",
                        self.config.llm.provider.label(),
                        self.config.llm.model
                    ))
                    .color(theme::TEXT_SECONDARY)
                    .small(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                    }
                });
            });
        });

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            let mut action = SettingsAction::None;
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    action = settings::settings_panel(ui, &mut self.config, self.feedback.as_ref());
                });
            match action {
                SettingsAction::ApplyClicked => self.apply_settings(),
                SettingsAction::Changed => self.feedback = None,
                SettingsAction::None => {}
            }
        }

        // ── Document sidebar + chat ──────────────────────────
        let mut upload_clicked = false;
        let mut question = None;
        {
            let controller = self.controller.borrow();
            SidePanel::left("document_panel")
                .min_width(240.0)
                .max_width(300.0)
                .show(ctx, |ui| {
                    upload_clicked =
                        sidebar::document_panel(ui, controller.session()) == SidebarAction::UploadClicked;
                });
            CentralPanel::default().show(ctx, |ui| {
                question = chat::chat_panel(ui, &mut self.ui_state, controller.session());
            });
        }

        if upload_clicked {
            self.dispatch_upload(ctx);
        }
        if let Some(text) = question {
            self.dispatch_message(text, ctx);
        }
    }
}

impl TutorApp {
    /// Record the question now, then ask the tutor in the background.
    fn dispatch_message(&self, text: String, ctx: &egui::Context) {
        // Rejections already reached the status line through the event bus
        let begun = self.controller.borrow_mut().begin_send(&text);
        let Ok(pending) = begun else {
            return;
        };

        let controller = self.controller.clone();
        let tutor = self.tutor.clone();
        let ctx = ctx.clone();
        log::info!("Turn {} → {}", pending.turn_id, tutor.backend_name());

        wasm_bindgen_futures::spawn_local(async move {
            let result = tutor.converse(pending.request).await;
            controller.borrow_mut().complete_reply(pending.turn_id, result);
            ctx.request_repaint();
        });
    }

    /// Open the file picker and load the chosen PDF (async)
    fn dispatch_upload(&self, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let event_bus = self.event_bus.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let file = match pick_pdf_file().await {
                Ok(Some(file)) => file,
                Ok(None) => return,
                Err(e) => {
                    log::error!("File picker failed: {}", e);
                    event_bus.emit(TutorEvent::UploadFailed {
                        file_name: "file picker".to_string(),
                        message: e.to_string(),
                    });
                    ctx.request_repaint();
                    return;
                }
            };

            let meta = file.meta();
            if controller.borrow_mut().begin_upload(&meta).is_err() {
                ctx.request_repaint();
                return;
            }
            ctx.request_repaint();

            match file.read_bytes().await {
                Ok(bytes) => controller.borrow_mut().complete_upload(&meta.name, &bytes),
                Err(e) => controller.borrow_mut().fail_upload(&e),
            }
            ctx.request_repaint();
        });
    }
}
