use serde::{Deserialize, Serialize};

/// Events emitted by the tutor controller.
/// The UI drains these each frame to update its status line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TutorEvent {
    /// A PDF was accepted and is being read
    UploadStarted { file_name: String },

    /// The PDF is encoded and attached to the session
    DocumentReady { name: String, size_bytes: u64 },

    /// Reading the selected file failed
    UploadFailed { file_name: String, message: String },

    /// An upload or send was ignored
    ActionRejected { reason: String },

    /// A question went out to the tutor
    ReplyStarted { turn_id: u64, carries_document: bool },

    /// The tutor answered and the reply was appended
    ReplyReceived { turn_id: u64, has_visualization: bool },

    /// The tutor call failed; an apology was appended instead
    ReplyFailed { turn_id: u64, message: String },

    /// A marker block was present but could not be decoded
    VisualizationDropped { turn_id: u64, reason: String },
}
