//! Port traits — the boundary between the controller and the browser.
//!
//! Implementations live in `tutor-platform`. The core only sees these
//! traits, so the state machine runs unchanged under native tests.

use async_trait::async_trait;
use serde::Serialize;
use tutor_types::{
    Result,
    document::FileMeta,
    message::{Message, Role},
};

// ─── Tutor Port ──────────────────────────────────────────────

/// The collaborator only knows two speakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Model,
}

impl From<Role> for Speaker {
    /// System notices are folded into the model side so the
    /// collaborator still sees which document was uploaded.
    fn from(role: Role) -> Self {
        match role {
            Role::User => Speaker::User,
            Role::Tutor | Role::System => Speaker::Model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl From<&Message> for HistoryTurn {
    fn from(msg: &Message) -> Self {
        Self {
            speaker: msg.role.into(),
            text: msg.content.clone(),
        }
    }
}

/// Base64 document bytes riding along with a question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentAttachment {
    pub name: String,
    pub mime_type: String,
    pub data: String,
}

/// One outbound turn: prior transcript, optional document, the new question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TutorRequest {
    pub history: Vec<HistoryTurn>,
    pub document: Option<DocumentAttachment>,
    pub user_text: String,
}

#[async_trait(?Send)]
pub trait TutorPort {
    /// Send one turn and return the raw reply text, marker blocks included.
    async fn converse(&self, req: TutorRequest) -> Result<String>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── File Port ───────────────────────────────────────────────

/// A file the user picked, not yet read.
#[async_trait(?Send)]
pub trait FileSource {
    fn meta(&self) -> FileMeta;

    async fn read_bytes(&self) -> Result<Vec<u8>>;
}
