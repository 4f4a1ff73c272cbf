use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::client::{ApiClient, TranslationRequest};
use super::prompt::build_system_prompt;
use crate::local::{ChatMessage, GenerateRequest, Prompt, PullStatus, SamplingParams, TextGenerator};
use crate::ui::{DownloadBar, Spinner};

/// A yes/no question that must be answered "yes" before a strategy runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub prompt: &'static str,
    /// Printed when the user answers "no"; the run ends there.
    pub on_decline: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Ready,
    Unavailable(String),
}

/// One named way of producing a translation.
#[async_trait]
pub trait TranslationStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn availability(&self) -> Availability {
        Availability::Ready
    }

    /// Questions asked, in order, before [`translate`](Self::translate) is called.
    fn confirmations(&self) -> &[Confirmation] {
        &[]
    }

    /// Status line shown right before translating.
    fn announcement(&self) -> Option<&str> {
        None
    }

    /// Advice shown after this strategy fails.
    fn failure_hint(&self) -> Option<&str> {
        None
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String>;
}

/// Translates through the hosted chat-completions API.
pub struct RemoteApiStrategy {
    client: Option<ApiClient>,
    api_key_env: String,
}

impl RemoteApiStrategy {
    /// `client` is `None` when no credential is configured.
    pub const fn new(client: Option<ApiClient>, api_key_env: String) -> Self {
        Self {
            client,
            api_key_env,
        }
    }
}

#[async_trait]
impl TranslationStrategy for RemoteApiStrategy {
    fn name(&self) -> &'static str {
        "API"
    }

    fn availability(&self) -> Availability {
        if self.client.is_some() {
            Availability::Ready
        } else {
            Availability::Unavailable(format!(
                "No {} found in environment. API mode unavailable.",
                self.api_key_env
            ))
        }
    }

    fn announcement(&self) -> Option<&str> {
        Some("[Mode] Using Sarvam cloud API (fast). Translating...")
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("API client is not configured"))?;

        let _spinner = Spinner::new("Translating...");
        client.translate(request).await
    }
}

pub const LOCAL_CONFIRMATIONS: [Confirmation; 2] = [
    Confirmation {
        prompt: "Do you want to use local model instead?",
        on_decline: "Exiting. To use cloud API set SARVAM_API_KEY environment variable and re-run.",
    },
    Confirmation {
        prompt: "Local model is large (~several GB). Continue and download model?",
        on_decline: "Cancelled local download. Exiting.",
    },
];

/// Translates with a model running on this machine.
pub struct LocalModelStrategy {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl LocalModelStrategy {
    pub fn new(generator: Arc<dyn TextGenerator>, model: String) -> Self {
        Self { generator, model }
    }

    fn generate_request(&self, request: &TranslationRequest) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: Prompt::Chat(vec![
                ChatMessage::system(build_system_prompt(&request.target_language)),
                ChatMessage::user(request.source_text.clone()),
            ]),
            params: SamplingParams {
                temperature: 0.01,
                top_p: None,
                max_new_tokens: 256,
                stop: Vec::new(),
            },
        }
    }
}

#[async_trait]
impl TranslationStrategy for LocalModelStrategy {
    fn name(&self) -> &'static str {
        "Local"
    }

    fn confirmations(&self) -> &[Confirmation] {
        &LOCAL_CONFIRMATIONS
    }

    fn announcement(&self) -> Option<&str> {
        Some("[Local] Translating (this may take time)...")
    }

    fn failure_hint(&self) -> Option<&str> {
        Some("Suggestion: set SARVAM_API_KEY for API mode or run on a GPU machine.")
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        crate::status!(
            "[Local] Loading model {}. This may take a long time and consume many GB of disk/RAM.",
            self.model
        );

        let bar = DownloadBar::new(&self.model);
        self.generator
            .prepare(&self.model, &|status: &PullStatus| bar.update(status))
            .await?;
        bar.finish();

        let _spinner = Spinner::new("Generating...");
        self.generator.generate(&self.generate_request(request)).await
    }
}
