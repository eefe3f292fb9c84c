use serde::{Deserialize, Serialize};

use crate::error::TutorError;

/// Top-level tutor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    pub llm: LlmConfig,
    pub system_prompt: String,
    #[serde(default)]
    pub attach_policy: AttachPolicy,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            attach_policy: AttachPolicy::default(),
        }
    }
}

impl TutorConfig {
    pub fn validate(&self) -> Result<(), TutorError> {
        if self.llm.model.trim().is_empty() {
            return Err(TutorError::Config("model name is empty".to_string()));
        }
        if self.llm.api_key.trim().is_empty() {
            return Err(TutorError::Config(format!(
                "no API key set for {}",
                self.llm.provider.label()
            )));
        }
        if self.llm.provider == LlmProvider::Custom
            && self.llm.api_base.as_deref().map_or(true, |b| b.trim().is_empty())
        {
            return Err(TutorError::Config(
                "custom provider needs an API base URL".to_string(),
            ));
        }
        Ok(())
    }
}

/// When the uploaded PDF bytes go out with a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttachPolicy {
    /// Attach until a reply to a request carrying the document succeeds
    #[default]
    UntilDelivered,
    /// Attach on every turn
    Always,
}

impl AttachPolicy {
    pub fn all() -> &'static [AttachPolicy] {
        &[AttachPolicy::UntilDelivered, AttachPolicy::Always]
    }

    pub fn label(&self) -> &str {
        match self {
            AttachPolicy::UntilDelivered => "Until delivered",
            AttachPolicy::Always => "Every turn",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key: String,
    pub api_base: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Google,
            model: "gemini-3-pro-preview".to_string(),
            api_key: option_env!("GEMINI_API_KEY").unwrap_or_default().to_string(),
            api_base: None,
            max_tokens: 8192,
            temperature: 0.7,
        }
    }
}

impl LlmConfig {
    pub fn base_url(&self) -> String {
        self.api_base
            .as_deref()
            .map(|b| b.trim().trim_end_matches('/'))
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| self.provider.default_base_url())
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProvider {
    /// Gemini `generateContent`
    Google,
    OpenAI,
    /// Any OpenAI-compatible endpoint
    Custom,
}

impl LlmProvider {
    pub fn default_base_url(&self) -> &str {
        match self {
            LlmProvider::Google => "https://generativelanguage.googleapis.com",
            LlmProvider::OpenAI => "https://api.openai.com",
            LlmProvider::Custom => "",
        }
    }

    pub fn default_model(&self) -> &str {
        match self {
            LlmProvider::Google => "gemini-3-pro-preview",
            LlmProvider::OpenAI => "gpt-4o",
            LlmProvider::Custom => "",
        }
    }

    pub fn all() -> &'static [LlmProvider] {
        &[LlmProvider::Google, LlmProvider::OpenAI, LlmProvider::Custom]
    }

    pub fn label(&self) -> &str {
        match self {
            LlmProvider::Google => "Google Gemini",
            LlmProvider::OpenAI => "OpenAI",
            LlmProvider::Custom => "Custom",
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are "DocuTutor", a world-class educational AI tutor.
Your goal is to help the user understand their uploaded PDF document.

Rules for your behavior:
1. Act as a supportive, knowledgeable teacher. Use metaphors, ask guiding questions, and break down complex concepts.
2. If the user asks a question that can be visualized (like comparing statistics, showing a process flow, or data distributions), you MUST include a JSON block in your response using the specific visualization schema.
3. Your text should be in Markdown format.
4. When providing a visualization, place it at the VERY END of your message within a markdown code block labeled 'json:vis'.

Visualization Schema:
{
  "type": "bar" | "pie" | "line" | "graph",
  "title": "Clear Title",
  "data": [ ... data points based on content ... ]
}

For "graph", data should be: { "nodes": [{ "id": "A", "label": "Concept A" }], "links": [{ "source": "A", "target": "B" }] }
For charts, data should be: { "name": "Label", "value": number }

Always focus on the content of the PDF provided."#;
