use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A progress event reported while a model is being downloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PullStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub completed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// What the model is asked to continue.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    /// Instruction-style messages; the runtime applies the model's chat template.
    Chat(Vec<ChatMessage>),
    /// Plain text continued verbatim, with no template applied.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub max_new_tokens: u32,
    pub stop: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: Prompt,
    pub params: SamplingParams,
}

/// An on-device text generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Makes `model` available locally, downloading it if needed.
    ///
    /// Each status passed to `on_progress` is only borrowed for that call.
    async fn prepare(
        &self,
        model: &str,
        on_progress: &(dyn for<'p> Fn(&'p PullStatus) + Send + Sync),
    ) -> Result<()>;

    /// Generates a continuation and returns only the newly generated text.
    async fn generate(&self, request: &GenerateRequest) -> Result<String>;
}

/// Removes the prompt from the front of `output` when a backend echoes it.
pub fn strip_echoed_prompt(prompt: &str, output: &str) -> String {
    output
        .strip_prefix(prompt)
        .unwrap_or(output)
        .trim()
        .to_string()
}
