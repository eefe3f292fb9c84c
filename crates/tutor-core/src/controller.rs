//! Tutor controller — the conversation state machine.
//!
//! Owns the single [`Session`] and is the only code that mutates it.
//! Phases: Idle → Uploading → Idle, and Idle → AwaitingReply → Idle.
//!
//! The async transitions are split into `begin_*` / `complete_*` halves.
//! A caller that shares the controller through a `RefCell` borrows it for
//! each half and awaits the file read or tutor call in between, so the UI
//! can keep rendering and never sees a half-applied transition.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tutor_types::{
    Rejection, Result, TutorError,
    config::{AttachPolicy, TutorConfig},
    document::{ActiveDocument, FileMeta, PDF_MIME_TYPE},
    event::TutorEvent,
    message::Message,
    session::{Session, SessionPhase},
};
use crate::event_bus::EventBus;
use crate::extract::extract;
use crate::ports::*;

pub const GREETING: &str = "Hello! I'm your DocuTutor. Upload a PDF, and I'll help you master its content with explanations and interactive diagrams.";

pub const APOLOGY: &str =
    "I encountered an error while thinking. Please try again or check your file.";

pub fn upload_notice(file_name: &str) -> String {
    format!(
        "Document uploaded: {}. I've processed the content and am ready to teach!",
        file_name
    )
}

/// A question that has been recorded and is waiting for the tutor.
#[derive(Debug, Clone)]
pub struct PendingReply {
    pub turn_id: u64,
    pub request: TutorRequest,
}

pub struct TutorController {
    config: TutorConfig,
    session: Session,
    event_bus: EventBus,
    turn_counter: u64,
}

impl TutorController {
    pub fn new(config: TutorConfig, event_bus: EventBus) -> Self {
        Self {
            config,
            session: Session::new(GREETING),
            event_bus,
            turn_counter: 0,
        }
    }

    pub fn config(&self) -> &TutorConfig {
        &self.config
    }

    /// Takes effect from the next turn.
    pub fn set_config(&mut self, config: TutorConfig) {
        self.config = config;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transcript(&self) -> &[Message] {
        &self.session.transcript
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.session.phase
    }

    pub fn is_busy(&self) -> bool {
        !self.session.phase.is_idle()
    }

    fn reject(&self, rejection: Rejection) -> Rejection {
        log::warn!("Ignoring action: {}", rejection);
        if rejection != Rejection::EmptyMessage {
            self.event_bus.emit(TutorEvent::ActionRejected {
                reason: rejection.to_string(),
            });
        }
        rejection
    }

    // ─── Upload ──────────────────────────────────────────────

    /// Accept a picked file and enter `Uploading`.
    ///
    /// Rejected without touching the session if something is already in
    /// flight or the file is not a PDF.
    pub fn begin_upload(&mut self, meta: &FileMeta) -> std::result::Result<(), Rejection> {
        if !self.session.phase.is_idle() {
            return Err(self.reject(Rejection::Busy {
                phase: self.session.phase.clone(),
            }));
        }
        if !meta.is_pdf() {
            return Err(self.reject(Rejection::NotPdf {
                name: meta.name.clone(),
                mime_type: meta.mime_type.clone(),
            }));
        }

        log::info!("Reading {} ({} bytes)", meta.name, meta.size_bytes);
        self.session.phase = SessionPhase::Uploading {
            file_name: meta.name.clone(),
        };
        self.event_bus.emit(TutorEvent::UploadStarted {
            file_name: meta.name.clone(),
        });
        Ok(())
    }

    /// Encode the file locally, make it the active document and announce it.
    pub fn complete_upload(&mut self, file_name: &str, bytes: &[u8]) {
        if !self.session.upload_in_flight() {
            log::warn!("Upload of {} finished outside an upload; dropped", file_name);
            return;
        }

        let size_bytes = bytes.len() as u64;
        let encoded = BASE64.encode(bytes);
        self.session.active_document = Some(ActiveDocument::new(file_name, encoded, size_bytes));
        self.session.transcript.push(Message::system(upload_notice(file_name)));
        self.session.phase = SessionPhase::Idle;

        log::info!("Document ready: {} ({} bytes)", file_name, size_bytes);
        self.event_bus.emit(TutorEvent::DocumentReady {
            name: file_name.to_string(),
            size_bytes,
        });
    }

    /// Reading the file failed; go back to `Idle` with the old document.
    pub fn fail_upload(&mut self, error: &TutorError) {
        let SessionPhase::Uploading { file_name } = &self.session.phase else {
            log::warn!("Upload failure reported outside an upload: {}", error);
            return;
        };

        log::error!("Failed to read {}: {}", file_name, error);
        self.event_bus.emit(TutorEvent::UploadFailed {
            file_name: file_name.clone(),
            message: error.to_string(),
        });
        self.session.phase = SessionPhase::Idle;
    }

    /// Full upload transition for callers that own the controller.
    pub async fn submit_upload(
        &mut self,
        file: &dyn FileSource,
    ) -> std::result::Result<(), Rejection> {
        let meta = file.meta();
        self.begin_upload(&meta)?;
        match file.read_bytes().await {
            Ok(bytes) => self.complete_upload(&meta.name, &bytes),
            Err(e) => self.fail_upload(&e),
        }
        Ok(())
    }

    // ─── Conversation ────────────────────────────────────────

    /// Record the user's question and build the outbound request.
    ///
    /// Blank text or a session that is not idle is a no-op: nothing is
    /// appended and no request is produced.
    pub fn begin_send(&mut self, text: &str) -> std::result::Result<PendingReply, Rejection> {
        if text.trim().is_empty() {
            return Err(self.reject(Rejection::EmptyMessage));
        }
        if !self.session.phase.is_idle() {
            return Err(self.reject(Rejection::Busy {
                phase: self.session.phase.clone(),
            }));
        }

        // History is everything before this question
        let history: Vec<HistoryTurn> = self
            .session
            .transcript
            .iter()
            .map(HistoryTurn::from)
            .collect();
        let document = self.attachment_for_next_turn();
        let carries_document = document.is_some();

        self.turn_counter += 1;
        let turn_id = self.turn_counter;

        self.session.transcript.push(Message::user(text));
        self.session.phase = SessionPhase::AwaitingReply {
            turn_id,
            carries_document,
        };
        self.event_bus.emit(TutorEvent::ReplyStarted {
            turn_id,
            carries_document,
        });

        Ok(PendingReply {
            turn_id,
            request: TutorRequest {
                history,
                document,
                user_text: text.to_string(),
            },
        })
    }

    fn attachment_for_next_turn(&self) -> Option<DocumentAttachment> {
        let doc = self.session.active_document.as_ref()?;
        let attach = match self.config.attach_policy {
            AttachPolicy::Always => true,
            AttachPolicy::UntilDelivered => !doc.delivered,
        };
        attach.then(|| DocumentAttachment {
            name: doc.name.clone(),
            mime_type: PDF_MIME_TYPE.to_string(),
            data: doc.encoded_bytes.clone(),
        })
    }

    /// Append the tutor's answer (or an apology) and return to `Idle`.
    ///
    /// Collaborator errors stop here; they are logged, never returned.
    pub fn complete_reply(&mut self, turn_id: u64, result: Result<String>) {
        let carries_document = match self.session.phase {
            SessionPhase::AwaitingReply {
                turn_id: current,
                carries_document,
            } if current == turn_id => carries_document,
            _ => {
                log::warn!("Reply for turn {} arrived while {}; dropped", turn_id, self.session.phase);
                return;
            }
        };

        match result {
            Ok(raw) => {
                let extraction = extract(&raw);
                if let Some(e) = &extraction.malformed {
                    self.event_bus.emit(TutorEvent::VisualizationDropped {
                        turn_id,
                        reason: e.to_string(),
                    });
                }
                let has_visualization = extraction.visualization.is_some();
                self.session.transcript.push(Message::tutor_reply(
                    extraction.narrative,
                    extraction.visualization,
                ));

                if carries_document {
                    if let Some(doc) = self.session.active_document.as_mut() {
                        doc.delivered = true;
                    }
                }
                self.event_bus.emit(TutorEvent::ReplyReceived {
                    turn_id,
                    has_visualization,
                });
            }
            Err(e) => {
                log::error!("Tutor turn {} failed: {}", turn_id, e);
                self.session.transcript.push(Message::tutor(APOLOGY));
                self.event_bus.emit(TutorEvent::ReplyFailed {
                    turn_id,
                    message: e.to_string(),
                });
            }
        }

        self.session.phase = SessionPhase::Idle;
    }

    /// Full send transition for callers that own the controller.
    pub async fn send_message(
        &mut self,
        text: &str,
        tutor: &dyn TutorPort,
    ) -> std::result::Result<(), Rejection> {
        let pending = self.begin_send(text)?;
        log::info!("Turn {} → {}", pending.turn_id, tutor.backend_name());
        let result = tutor.converse(pending.request).await;
        self.complete_reply(pending.turn_id, result);
        Ok(())
    }
}
