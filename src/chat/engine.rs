use anyhow::Result;
use std::sync::Arc;

use super::history::{ChatHistory, extract_reply};
use crate::config::ChatConfig;
use crate::local::{GenerateRequest, Prompt, PullStatus, SamplingParams, TextGenerator};

/// Generates chat replies from a local model.
///
/// Holds no conversation state; callers own their [`ChatHistory`].
#[derive(Clone)]
pub struct ChatEngine {
    generator: Arc<dyn TextGenerator>,
    model: String,
    params: SamplingParams,
}

impl ChatEngine {
    pub fn new(generator: Arc<dyn TextGenerator>, model: String, config: &ChatConfig) -> Self {
        Self {
            generator,
            model,
            params: SamplingParams {
                temperature: config.temperature,
                top_p: Some(config.top_p),
                max_new_tokens: config.max_new_tokens,
                stop: vec!["\nUser:".to_string()],
            },
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub const fn params(&self) -> &SamplingParams {
        &self.params
    }

    /// Downloads/loads the model. Call once before the first reply.
    pub async fn load(
        &self,
        on_progress: &(dyn for<'p> Fn(&'p PullStatus) + Send + Sync),
    ) -> Result<()> {
        self.generator.prepare(&self.model, on_progress).await
    }

    /// Answers `input` in the context of `history` and records the turn.
    ///
    /// On failure the history is left untouched.
    pub async fn reply(&self, history: &mut ChatHistory, input: &str) -> Result<String> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: Prompt::Raw(history.prompt_for(input)),
            params: self.params.clone(),
        };

        let generated = self.generator.generate(&request).await?;
        let reply = extract_reply(&generated);
        tracing::debug!(turns = history.len() + 1, chars = reply.len(), "chat reply generated");

        history.push(input, reply.clone());
        Ok(reply)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with a fixed continuation and records every prompt it sees.
    pub(crate) struct ScriptedGenerator {
        pub(crate) reply: String,
        pub(crate) prompts: Mutex<Vec<String>>,
        pub(crate) fail: bool,
    }

    impl ScriptedGenerator {
        pub(crate) fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn prepare(
            &self,
            _model: &str,
            on_progress: &(dyn for<'p> Fn(&'p PullStatus) + Send + Sync),
        ) -> Result<()> {
            on_progress(&PullStatus {
                status: "success".to_string(),
                ..PullStatus::default()
            });
            Ok(())
        }

        async fn generate(&self, request: &GenerateRequest) -> Result<String> {
            if let Prompt::Raw(prompt) = &request.prompt {
                self.prompts.lock().unwrap().push(prompt.clone());
            }
            if self.fail {
                anyhow::bail!("generation crashed");
            }
            Ok(self.reply.clone())
        }
    }

    fn engine(generator: Arc<ScriptedGenerator>) -> ChatEngine {
        ChatEngine::new(generator, "chat".to_string(), &ChatConfig::default())
    }

    #[test]
    fn test_sampling_params_from_config() {
        let engine = engine(Arc::new(ScriptedGenerator::new("")));
        let params = engine.params();
        assert_eq!(params.max_new_tokens, 200);
        assert!((params.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(params.top_p, Some(0.9));
    }

    #[tokio::test]
    async fn test_load_forwards_progress_to_callback() {
        let engine = engine(Arc::new(ScriptedGenerator::new("")));
        let seen = Mutex::new(Vec::new());

        engine
            .load(&|status: &PullStatus| seen.lock().unwrap().push(status.status.clone()))
            .await
            .unwrap();

        assert_eq!(seen.into_inner().unwrap(), vec!["success"]);
    }

    #[tokio::test]
    async fn test_reply_builds_transcript_and_records_turn() {
        let generator = Arc::new(ScriptedGenerator::new(" Doing well, thanks!"));
        let engine = engine(generator.clone());
        let mut history = ChatHistory::new();
        history.push("hi", "hello");

        let reply = engine.reply(&mut history, "how are you?").await.unwrap();

        assert_eq!(reply, "Doing well, thanks!");
        assert_eq!(
            generator.prompts.lock().unwrap()[0],
            "User: hi\nBot: hello\nUser: how are you?\nBot:"
        );
        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[1].user, "how are you?");
        assert_eq!(history.turns()[1].bot, "Doing well, thanks!");
    }

    #[tokio::test]
    async fn test_reply_takes_text_after_last_bot_marker() {
        let generator = Arc::new(ScriptedGenerator::new(" ok\nUser: more\nBot: final answer"));
        let engine = engine(generator);
        let mut history = ChatHistory::new();

        let reply = engine.reply(&mut history, "q").await.unwrap();
        assert_eq!(reply, "final answer");
    }

    #[tokio::test]
    async fn test_failed_reply_leaves_history_untouched() {
        let generator = Arc::new(ScriptedGenerator {
            fail: true,
            ..ScriptedGenerator::new("unused")
        });
        let engine = engine(generator);
        let mut history = ChatHistory::new();
        history.push("hi", "hello");

        assert!(engine.reply(&mut history, "q").await.is_err());
        assert_eq!(history.len(), 1);
    }
}
