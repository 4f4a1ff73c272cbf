use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::generator::{
    ChatMessage, GenerateRequest, Prompt, PullStatus, SamplingParams, TextGenerator,
    strip_echoed_prompt,
};
use super::ndjson::ndjson_stream;

#[derive(Debug, Error)]
pub enum LocalError {
    #[error(
        "Local mode requires an Ollama server at {endpoint}.\n\n\
         Install it from https://ollama.com, start it with 'ollama serve', and re-run."
    )]
    RuntimeUnavailable { endpoint: String },

    #[error("Local runtime error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Model download failed: {0}")]
    Pull(String),
}

#[derive(Debug, Serialize)]
struct Options<'a> {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    num_predict: u32,
    #[serde(skip_serializing_if = "no_stop_sequences")]
    stop: &'a [String],
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn no_stop_sequences(stop: &&[String]) -> bool {
    stop.is_empty()
}

impl<'a> From<&'a SamplingParams> for Options<'a> {
    fn from(params: &'a SamplingParams) -> Self {
        Self {
            temperature: params.temperature,
            top_p: params.top_p,
            num_predict: params.max_new_tokens,
            stop: &params.stop,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: Options<'a>,
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    raw: bool,
    stream: bool,
    options: Options<'a>,
}

#[derive(Debug, Serialize)]
struct PullBody<'a> {
    model: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    response: String,
}

#[derive(Debug, Deserialize)]
struct PullLine {
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    progress: PullStatus,
}

#[derive(Debug, Deserialize)]
struct VersionReply {
    version: String,
}

/// Client for an Ollama server running on this machine.
pub struct OllamaClient {
    client: Client,
    endpoint: String,
}

impl OllamaClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint.trim_end_matches('/'))
    }

    fn unavailable(&self) -> LocalError {
        LocalError::RuntimeUnavailable {
            endpoint: self.endpoint.clone(),
        }
    }

    /// Returns the runtime version, failing with an install hint when the
    /// server cannot be reached.
    pub async fn version(&self) -> Result<String> {
        let response = self
            .client
            .get(self.url("/api/version"))
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "local runtime unreachable");
                self.unavailable()
            })?;

        if !response.status().is_success() {
            return Err(self.unavailable().into());
        }

        let reply: VersionReply = response
            .json()
            .await
            .context("Failed to parse local runtime version")?;
        Ok(reply.version)
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    anyhow::Error::from(self.unavailable())
                } else {
                    anyhow::Error::from(e).context(format!("Request to local runtime failed: {url}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LocalError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(response)
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn prepare(
        &self,
        model: &str,
        on_progress: &(dyn for<'p> Fn(&'p PullStatus) + Send + Sync),
    ) -> Result<()> {
        let version = self.version().await?;
        tracing::info!(%version, %model, "pulling model");

        let response = self
            .post_json(
                "/api/pull",
                &PullBody {
                    model,
                    stream: true,
                },
            )
            .await?;

        let mut lines = std::pin::pin!(ndjson_stream::<PullLine>(response.bytes_stream()));
        let mut finished = false;

        while let Some(line) = lines.next().await {
            let line = line?;
            if let Some(error) = line.error {
                return Err(LocalError::Pull(error).into());
            }
            finished = line.progress.status == "success";
            on_progress(&line.progress);
        }

        if finished {
            Ok(())
        } else {
            Err(LocalError::Pull(format!("download of '{model}' ended before completion")).into())
        }
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        let options = Options::from(&request.params);

        match &request.prompt {
            Prompt::Chat(messages) => {
                let reply: ChatReply = self
                    .post_json(
                        "/api/chat",
                        &ChatBody {
                            model: &request.model,
                            messages,
                            stream: false,
                            options,
                        },
                    )
                    .await?
                    .json()
                    .await
                    .context("Failed to parse local chat response")?;
                Ok(reply.message.content.trim().to_string())
            }
            Prompt::Raw(prompt) => {
                let reply: GenerateReply = self
                    .post_json(
                        "/api/generate",
                        &GenerateBody {
                            model: &request.model,
                            prompt,
                            raw: true,
                            stream: false,
                            options,
                        },
                    )
                    .await?
                    .json()
                    .await
                    .context("Failed to parse local generate response")?;
                Ok(strip_echoed_prompt(prompt, &reply.response))
            }
        }
    }
}
