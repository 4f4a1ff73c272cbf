use anyhow::Result;
use std::sync::Arc;

use crate::chat::{ChatEngine, ChatSession};
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::local::OllamaClient;

pub struct ChatOptions {
    pub model: Option<String>,
}

pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let config = load_chat_config(ResolveOptions {
        local_model: options.model,
        ..ResolveOptions::default()
    })?;

    let mut session = ChatSession::new(build_engine(&config), config.local.endpoint.clone());
    session.run().await
}

pub(super) fn load_chat_config(options: ResolveOptions) -> Result<ResolvedConfig> {
    let config_file = ConfigManager::new()?.load_or_default()?;
    Ok(resolve_config(&options, &config_file))
}

/// Chat engine over the local runtime, with sampling from `[chat]`.
pub(super) fn build_engine(config: &ResolvedConfig) -> ChatEngine {
    let runtime = Arc::new(OllamaClient::new(config.local.endpoint.clone()));
    ChatEngine::new(runtime, config.local.chat_model.clone(), &config.chat)
}
