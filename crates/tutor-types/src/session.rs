use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::ActiveDocument;
use crate::message::Message;

/// What the session is doing right now.
///
/// Uploading and awaiting a reply are variants of one enum, so the two
/// can never be in flight together.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    Uploading { file_name: String },
    AwaitingReply { turn_id: u64, carries_document: bool },
}

impl SessionPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionPhase::Idle)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => f.write_str("idle"),
            SessionPhase::Uploading { file_name } => write!(f, "uploading {}", file_name),
            SessionPhase::AwaitingReply { turn_id, .. } => {
                write!(f, "awaiting reply to turn {}", turn_id)
            }
        }
    }
}

/// The one conversation a running client holds. Lives in memory only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub transcript: Vec<Message>,
    pub active_document: Option<ActiveDocument>,
    pub phase: SessionPhase,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// A fresh session whose transcript starts with the tutor's greeting.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            transcript: vec![Message::tutor(greeting)],
            active_document: None,
            phase: SessionPhase::Idle,
            created_at: Utc::now(),
        }
    }

    pub fn upload_in_flight(&self) -> bool {
        matches!(self.phase, SessionPhase::Uploading { .. })
    }

    pub fn reply_in_flight(&self) -> bool {
        matches!(self.phase, SessionPhase::AwaitingReply { .. })
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.transcript.last()
    }

    pub fn document_name(&self) -> Option<&str> {
        self.active_document.as_ref().map(|d| d.name.as_str())
    }
}
