use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::time::Duration;
use thiserror::Error;

use super::prompt::build_system_prompt;
use super::response::extract_translation;

#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub source_text: String,
    pub target_language: String,
}

/// Failures of the hosted API that callers may want to inspect.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// The body parsed as JSON but matched no known response shape.
    /// Carries the raw serialized body for diagnosis.
    #[error("API returned an unrecognized response shape: {0}")]
    UnrecognizedResponse(String),
}

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

/// Client for the hosted chat-completions translation endpoint.
pub struct ApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl ApiClient {
    pub fn new(
        endpoint: String,
        api_key: String,
        model: String,
        timeout: Duration,
        max_tokens: u32,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            model,
            max_tokens,
        })
    }

    pub fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }

    pub async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        let url = self.completions_url();

        let chat_request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: Cow::Owned(build_system_prompt(&request.target_language)),
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed(&request.source_text),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: 0.0,
        };

        tracing::debug!(
            %url,
            model = %self.model,
            language = %request.target_language,
            "sending translation request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let data: Value = response
            .json()
            .await
            .context("Failed to parse API response as JSON")?;

        extract_translation(&data).ok_or_else(|| {
            tracing::warn!("unrecognized translation response shape");
            ApiError::UnrecognizedResponse(data.to_string()).into()
        })
    }
}
