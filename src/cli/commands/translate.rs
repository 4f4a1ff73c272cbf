use anyhow::{Result, bail};
use inquire::{Confirm, Text};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::input::InputReader;
use crate::local::OllamaClient;
use crate::translation::{
    ApiClient, Confirmation, Dispatcher, Interaction, LocalModelStrategy, Outcome,
    RemoteApiStrategy, TranslationRequest, TranslationStrategy, pick_language,
    print_language_menu, resolve_language,
};
use crate::ui::{Style, handle_prompt_cancellation, is_prompt_cancelled};
use crate::{alert, status};

pub struct TranslateOptions {
    pub text: Vec<String>,
    pub file: Option<PathBuf>,
    pub to: Option<String>,
    pub local: bool,
    pub model: Option<String>,
}

/// Runs the translation flow.
///
/// Returns `None` when the user cancelled a prompt before anything was sent.
pub async fn run_translate(options: TranslateOptions) -> Result<Option<Outcome>> {
    let config_file = ConfigManager::new()?.load_or_default()?;
    let config = resolve_config(&resolve_options(&options), &config_file);
    let interactive = io::stdin().is_terminal();

    let Some(source_text) = gather_text(&options)? else {
        return Ok(None);
    };

    let target = match options.to.as_deref() {
        Some(choice) => resolve_language(choice)?,
        None if interactive => {
            let default = config.default_language.as_deref();
            let Some(target) = handle_prompt_cancellation(|| prompt_language(default))? else {
                return Ok(None);
            };
            target
        }
        None => default_language(config.default_language.as_deref())?,
    };

    let dispatcher = Dispatcher::new(build_strategies(&config, options.local)?);
    tracing::debug!(
        strategies = ?dispatcher.strategy_names(),
        language = target,
        "dispatching translation"
    );

    let request = TranslationRequest {
        source_text,
        target_language: target.to_string(),
    };
    let mut interaction = TerminalInteraction { interactive };
    let outcome = dispatcher.translate(&request, &mut interaction).await?;

    match &outcome {
        Outcome::Translated { text, .. } => {
            status!("\n{}", Style::header(format!("Translated ({target}):")));
            println!("{text}");
        }
        Outcome::Declined { message, .. } => alert!("{message}"),
        Outcome::Exhausted { .. } => {
            alert!("{}", Style::error("No translation strategy succeeded."));
        }
    }

    Ok(Some(outcome))
}

/// `--model` names the local model under `--local`, the API model otherwise.
fn resolve_options(options: &TranslateOptions) -> ResolveOptions {
    if options.local {
        ResolveOptions {
            local_model: options.model.clone(),
            ..ResolveOptions::default()
        }
    } else {
        ResolveOptions {
            api_model: options.model.clone(),
            ..ResolveOptions::default()
        }
    }
}

/// Source text from, in order: positional words, `--file`, piped stdin, or
/// an interactive prompt.
fn gather_text(options: &TranslateOptions) -> Result<Option<String>> {
    let joined = options.text.join(" ");
    if !joined.trim().is_empty() {
        return Ok(Some(joined.trim().to_string()));
    }

    if let Some(path) = &options.file {
        return non_empty(InputReader::read_file(path)?).map(Some);
    }

    if let Some(piped) = InputReader::read_piped_stdin()? {
        return non_empty(piped).map(Some);
    }

    handle_prompt_cancellation(prompt_text)
}

fn non_empty(text: String) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        bail!("Input is empty");
    }
    Ok(trimmed.to_string())
}

fn prompt_text() -> Result<String> {
    let mut message = "Enter text to translate:";
    loop {
        let text = Text::new(message).prompt()?;
        if !text.trim().is_empty() {
            return Ok(text.trim().to_string());
        }
        message = "Please enter non-empty text:";
    }
}

fn prompt_language(default: Option<&str>) -> Result<&'static str> {
    print_language_menu();

    let default = default.and_then(pick_language);
    let mut message = "Target language (number or name):";
    loop {
        let mut prompt = Text::new(message);
        if let Some(lang) = default {
            prompt = prompt.with_default(lang);
        }
        if let Some(lang) = pick_language(&prompt.prompt()?) {
            return Ok(lang);
        }
        message = "Invalid choice. Enter number or language name:";
    }
}

/// Without a terminal the configured default is the only way to pick.
fn default_language(default: Option<&str>) -> Result<&'static str> {
    match default {
        Some(choice) => resolve_language(choice),
        None => bail!(
            "No target language given.\n\n\
             Pass one with --to (e.g. --to Hindi), or set a default with 'sarvam configure'."
        ),
    }
}

fn build_strategies(
    config: &ResolvedConfig,
    local_only: bool,
) -> Result<Vec<Box<dyn TranslationStrategy>>> {
    let mut strategies: Vec<Box<dyn TranslationStrategy>> = Vec::new();

    if !local_only {
        let client = config
            .api_key
            .clone()
            .map(|key| {
                ApiClient::new(
                    config.api.endpoint.clone(),
                    key,
                    config.api.model.clone(),
                    Duration::from_secs(config.api.timeout_secs),
                    config.api.max_tokens,
                )
            })
            .transpose()?;
        strategies.push(Box::new(RemoteApiStrategy::new(
            client,
            config.api.api_key_env.clone(),
        )));
    }

    let runtime = Arc::new(OllamaClient::new(config.local.endpoint.clone()));
    strategies.push(Box::new(LocalModelStrategy::new(
        runtime,
        config.local.translate_model.clone(),
    )));

    Ok(strategies)
}

/// Reports dispatch progress on stderr and asks confirmations with inquire.
struct TerminalInteraction {
    interactive: bool,
}

impl Interaction for TerminalInteraction {
    fn announce(&mut self, _strategy: &str, message: &str) {
        status!("\n{}\n", Style::tag(message));
    }

    fn unavailable(&mut self, _strategy: &str, reason: &str) {
        status!("\n{} {reason}", Style::secondary("[Info]"));
    }

    fn failed(&mut self, strategy: &str, error: &anyhow::Error, hint: Option<&str>) {
        alert!(
            "{} {error:#}",
            Style::error(format!("{strategy} translation failed:"))
        );
        if let Some(hint) = hint {
            alert!("{}", Style::warning(hint));
        }
    }

    fn confirm(&mut self, confirmation: &Confirmation) -> Result<bool> {
        if !self.interactive {
            alert!("{} (y/N): no terminal, answering No", confirmation.prompt);
            return Ok(false);
        }

        match Confirm::new(confirmation.prompt).with_default(false).prompt() {
            Ok(answer) => Ok(answer),
            Err(e) if is_prompt_cancelled(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
