//! Gemini `generateContent` adapter.
//!
//! The PDF rides along as an `inlineData` part on the final user turn,
//! so the model reads the document itself. Uses browser `fetch()` via
//! gloo-net.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use tutor_core::ports::*;
use tutor_types::{Result, TutorError, config::LlmConfig};

use super::{http_error, non_empty_reply};

pub struct GeminiTutor {
    config: LlmConfig,
    system_prompt: String,
}

impl GeminiTutor {
    pub fn new(config: LlmConfig, system_prompt: impl Into<String>) -> Self {
        Self {
            config,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url(),
            self.config.model
        )
    }

    pub fn build_request(&self, req: &TutorRequest) -> GenerateContentRequest {
        let mut contents: Vec<Content> = req
            .history
            .iter()
            .map(|turn| Content {
                role: Some(role_name(turn.speaker).to_string()),
                parts: vec![Part::text(&turn.text)],
            })
            .collect();

        let mut parts = Vec::with_capacity(2);
        if let Some(doc) = &req.document {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: doc.mime_type.clone(),
                    data: doc.data.clone(),
                },
            });
        }
        parts.push(Part::text(&req.user_text));
        contents.push(Content {
            role: Some("user".to_string()),
            parts,
        });

        let system_instruction = (!self.system_prompt.trim().is_empty()).then(|| Content {
            role: None,
            parts: vec![Part::text(&self.system_prompt)],
        });

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        }
    }
}

fn role_name(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::User => "user",
        Speaker::Model => "model",
    }
}

#[async_trait(?Send)]
impl TutorPort for GeminiTutor {
    async fn converse(&self, req: TutorRequest) -> Result<String> {
        let body = self.build_request(&req);

        let response = Request::post(&self.endpoint())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
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
        "gemini"
    }
}

/// Concatenate the text parts of the first candidate.
pub fn parse_reply(body: &str) -> Result<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();
    Ok(non_empty_reply(text))
}

// ─── Wire types ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    fn text(text: &str) -> Self {
        Part::Text {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
