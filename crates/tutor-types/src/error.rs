use thiserror::Error;

use crate::session::SessionPhase;
use crate::visualization::VisKind;

#[derive(Error, Debug, Clone)]
pub enum TutorError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Document error: {name}: {message}")]
    Document { name: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for TutorError {
    fn from(e: serde_json::Error) -> Self {
        TutorError::Serialization(e.to_string())
    }
}

/// Why a marker block did not yield a visualization
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VisualizationError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("unknown visualization type {0:?}")]
    UnknownKind(String),

    #[error("data does not fit a {kind} chart: {message}")]
    ShapeMismatch { kind: VisKind, message: String },
}

/// A user action the controller ignored without changing the session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("message is empty")]
    EmptyMessage,

    #[error("busy: {phase}")]
    Busy { phase: SessionPhase },

    #[error("{name} is not a PDF ({mime_type})")]
    NotPdf { name: String, mime_type: String },
}
