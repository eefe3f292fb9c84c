//! OpenAI-compatible tutor adapter.
//!
//! Works with OpenAI and any provider using the chat completions API
//! format. The PDF is sent as a `file` content part carrying a data URL.
//! Uses browser `fetch()` via gloo-net for WASM compatibility.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{json, Value};

use tutor_core::ports::*;
use tutor_types::{Result, TutorError, config::LlmConfig};

use super::{http_error, non_empty_reply};

pub struct OpenAiCompatTutor {
    config: LlmConfig,
    system_prompt: String,
}

impl OpenAiCompatTutor {
    pub fn new(config: LlmConfig, system_prompt: impl Into<String>) -> Self {
        Self {
            config,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url())
    }

    pub fn build_request_body(&self, req: &TutorRequest) -> Value {
        let mut messages = Vec::with_capacity(req.history.len() + 2);
        if !self.system_prompt.trim().is_empty() {
            messages.push(json!({ "role": "system", "content": self.system_prompt }));
        }
        messages.extend(req.history.iter().map(|turn| {
            json!({
                "role": role_name(turn.speaker),
                "content": turn.text,
            })
        }));

        let content = match &req.document {
            Some(doc) => json!([
                {
                    "type": "file",
                    "file": {
                        "filename": doc.name,
                        "file_data": format!("data:{};base64,{}", doc.mime_type, doc.data),
                    }
                },
                { "type": "text", "text": req.user_text },
            ]),
            None => json!(req.user_text),
        };
        messages.push(json!({ "role": "user", "content": content }));

        json!({
            "model": self.config.model,
            "messages": messages,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
        })
    }
}

fn role_name(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::User => "user",
        Speaker::Model => "assistant",
    }
}

#[async_trait(?Send)]
impl TutorPort for OpenAiCompatTutor {
    async fn converse(&self, req: TutorRequest) -> Result<String> {
        let body = self.build_request_body(&req);

        let response = Request::post(&self.endpoint())
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {}", self.config.api_key))
            .json(&body)
            .map_err(|e| TutorError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| TutorError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TutorError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(http_error(status, &text));
        }
        parse_reply(&text)
    }

    fn backend_name(&self) -> &str {
        "openai-compat"
    }
}

/// Text of the first choice.
pub fn parse_reply(body: &str) -> Result<String> {
    let data: ApiResponse = serde_json::from_str(body)?;
    let choice = data
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| TutorError::Llm("No choices in response".to_string()))?;
    Ok(non_empty_reply(choice.message.content.unwrap_or_default()))
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}
