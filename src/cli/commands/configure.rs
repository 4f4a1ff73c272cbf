//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Select, Text};

use crate::config::{ApiConfig, ConfigFile, ConfigManager};
use crate::translation::{SUPPORTED_LANGUAGES, pick_language};
use crate::ui::{Style, handle_prompt_cancellation};

/// Interactively edits the config file.
pub fn run_configure() -> Result<()> {
    handle_prompt_cancellation(run_configure_inner).map(|_| ())
}

fn run_configure_inner() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    print_config(&config, &manager);

    config.defaults.to = Some(select_target_language(config.defaults.to.as_deref())?);
    config.api.endpoint = ask("API endpoint:", &config.api.endpoint)?;
    config.api.model = ask("API model:", &config.api.model)?;
    config.api.api_key_env = ask("API key environment variable:", &config.api.api_key_env)?;
    config.local.endpoint = ask("Local runtime endpoint:", &config.local.endpoint)?;
    config.local.translate_model = ask("Local translation model:", &config.local.translate_model)?;
    config.local.chat_model = ask("Local chat model:", &config.local.chat_model)?;

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display().to_string())
    );

    Ok(())
}

/// Prints the effective configuration. The API key itself is never shown.
pub fn show_configure() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;
    print_config(&config, &manager);
    Ok(())
}

fn print_config(config: &ConfigFile, manager: &ConfigManager) {
    let row = |label: &str, value: String| {
        println!("  {}  {value}", Style::label(format!("{label:<16}")));
    };

    println!(
        "{} {}",
        Style::header("Configuration"),
        Style::secondary(manager.config_path().display().to_string())
    );
    row(
        "to",
        config
            .defaults
            .to
            .as_deref()
            .map_or_else(|| Style::secondary("(not set)"), Style::value),
    );
    row("api.endpoint", Style::value(&config.api.endpoint));
    row("api.model", Style::value(&config.api.model));
    row("api.key", key_status(&config.api));
    row("local.endpoint", Style::value(&config.local.endpoint));
    row("local.translate", Style::value(&config.local.translate_model));
    row("local.chat", Style::value(&config.local.chat_model));
    row(
        "chat.listen",
        Style::value(format!("{}:{}", config.chat.host, config.chat.port)),
    );
    println!();
}

fn key_status(api: &ApiConfig) -> String {
    let from_env = std::env::var(&api.api_key_env)
        .ok()
        .is_some_and(|v| !v.trim().is_empty());

    if from_env {
        Style::success(format!("set (from ${})", api.api_key_env))
    } else if api.get_api_key().is_some() {
        Style::success("set (config file)")
    } else {
        Style::warning(format!("not set (export {})", api.api_key_env))
    }
}

fn ask(message: &str, current: &str) -> Result<String> {
    let answer = Text::new(message).with_default(current).prompt()?;
    let answer = answer.trim();
    if answer.is_empty() {
        bail!("{} cannot be empty", message.trim_end_matches(':'));
    }
    Ok(answer.to_string())
}

fn select_target_language(default: Option<&str>) -> Result<String> {
    let default_index = default
        .and_then(pick_language)
        .and_then(|lang| SUPPORTED_LANGUAGES.iter().position(|l| *l == lang))
        .unwrap_or(0);

    let selection = Select::new("Default target language:", SUPPORTED_LANGUAGES.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_key_status_never_reveals_key() {
        let mut api = ApiConfig {
            api_key_env: "SARVAM_CONFIGURE_TEST_KEY".to_string(),
            api_key: Some("sk-very-secret".to_string()),
            ..ApiConfig::default()
        };
        unsafe { std::env::remove_var(&api.api_key_env) };

        let status = key_status(&api);
        assert!(status.contains("config file"));
        assert!(!status.contains("sk-very-secret"));

        api.api_key = None;
        assert!(key_status(&api).contains("not set"));
    }
}
