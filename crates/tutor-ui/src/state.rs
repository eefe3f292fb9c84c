//! UI-level state that drives rendering.
//!
//! The transcript itself is read straight from the controller's session
//! each frame; this only holds what the panels own (input text, the
//! settings toggle) and the status line fed by draining the EventBus.

use chrono::{DateTime, Local, Utc};
use tutor_types::event::TutorEvent;

/// How the status line is colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Ready,
    Busy,
    Warning,
    Error,
}

/// State visible to UI panels
pub struct UiState {
    /// Input field content
    pub input_text: String,
    /// Whether settings panel is open
    pub show_settings: bool,
    /// Status line text
    pub status_text: String,
    pub status_tone: StatusTone,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            show_settings: false,
            status_text: "Ready".to_string(),
            status_tone: StatusTone::Ready,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.status_text = text.into();
        self.status_tone = tone;
    }

    /// Process events from the EventBus and update the status line
    pub fn process_events(&mut self, events: Vec<TutorEvent>) {
        for event in events {
            match event {
                TutorEvent::UploadStarted { file_name } => {
                    self.set_status(format!("Reading {}...", file_name), StatusTone::Busy);
                }
                TutorEvent::DocumentReady { name, size_bytes } => {
                    self.set_status(
                        format!("Loaded {} ({})", name, format_size(size_bytes)),
                        StatusTone::Ready,
                    );
                }
                TutorEvent::UploadFailed { file_name, message } => {
                    self.set_status(
                        format!("Could not read {}: {}", file_name, message),
                        StatusTone::Error,
                    );
                }
                TutorEvent::ActionRejected { reason } => {
                    self.set_status(format!("Ignored: {}", reason), StatusTone::Warning);
                }
                TutorEvent::ReplyStarted { carries_document, .. } => {
                    let text = if carries_document {
                        "Reading the document and thinking..."
                    } else {
                        "Thinking..."
                    };
                    self.set_status(text, StatusTone::Busy);
                }
                TutorEvent::VisualizationDropped { reason, .. } => {
                    self.set_status(format!("Chart skipped: {}", reason), StatusTone::Warning);
                }
                TutorEvent::ReplyReceived { .. } => {
                    // Keep a chart warning from the same turn visible
                    if self.status_tone == StatusTone::Busy {
                        self.set_status("Ready", StatusTone::Ready);
                    }
                }
                TutorEvent::ReplyFailed { message, .. } => {
                    self.set_status(format!("Error: {}", message), StatusTone::Error);
                }
            }
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Message timestamp as local `HH:MM`
pub fn format_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}
