//! LLM adapters implementing `TutorPort`.

pub mod gemini;
pub mod openai_compat;

use std::rc::Rc;

use serde::Deserialize;
use tutor_core::ports::TutorPort;
use tutor_types::{
    TutorError,
    config::{LlmProvider, TutorConfig},
};

pub use gemini::GeminiTutor;
pub use openai_compat::OpenAiCompatTutor;

/// Shown when the model answers with no text at all.
pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't process that.";

/// Pick the adapter for the configured provider.
pub fn build_tutor(config: &TutorConfig) -> Rc<dyn TutorPort> {
    let llm = config.llm.clone();
    let system_prompt = config.system_prompt.clone();
    log::info!(
        "Using {} ({}) at {}",
        llm.provider.label(),
        llm.model,
        llm.base_url()
    );
    match llm.provider {
        LlmProvider::Google => Rc::new(GeminiTutor::new(llm, system_prompt)),
        LlmProvider::OpenAI | LlmProvider::Custom => {
            Rc::new(OpenAiCompatTutor::new(llm, system_prompt))
        }
    }
}

/// Fall back to [`EMPTY_REPLY`] when the model produced only whitespace.
pub(crate) fn non_empty_reply(text: String) -> String {
    if text.trim().is_empty() {
        EMPTY_REPLY.to_string()
    } else {
        text
    }
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Turn a non-2xx response into `TutorError::Llm`, keeping the provider's
/// own message when the body is the usual `{"error": {...}}` envelope.
pub fn http_error(status: u16, body: &str) -> TutorError {
    let detail = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| {
            let message = wrapper.error.message?;
            Some(match wrapper.error.status {
                Some(code) if !code.is_empty() => format!("{} ({})", message, code),
                _ => message,
            })
        })
        .unwrap_or_else(|| body.trim().to_string());
    TutorError::Llm(format!("HTTP {}: {}", status, detail))
}
