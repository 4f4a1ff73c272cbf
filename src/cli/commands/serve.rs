use anyhow::{Context, Result};

use super::chat::{build_engine, load_chat_config};
use crate::chat::{ChatServerState, web};
use crate::config::ResolveOptions;
use crate::local::PullStatus;
use crate::ui::DownloadBar;

pub struct ServeOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model: Option<String>,
}

/// Loads the chat model once, then serves the browser widget.
pub async fn run_serve(options: ServeOptions) -> Result<()> {
    let config = load_chat_config(ResolveOptions {
        local_model: options.model,
        host: options.host,
        port: options.port,
        ..ResolveOptions::default()
    })?;

    let engine = build_engine(&config);
    let bar = DownloadBar::new(engine.model());
    engine
        .load(&|status: &PullStatus| bar.update(status))
        .await
        .with_context(|| format!("Failed to load chat model {}", engine.model()))?;
    bar.finish();

    web::serve(
        ChatServerState::new(engine),
        &config.chat.host,
        config.chat.port,
    )
    .await
}
