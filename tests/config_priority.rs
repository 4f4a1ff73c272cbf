#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! These tests verify that CLI options take priority over config file settings.
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file values
//! 3. Built-in defaults

use sarvam_cli::config::{ConfigFile, ConfigManager, ResolveOptions, resolve_config};
use tempfile::TempDir;

fn make_config_with_values() -> ConfigFile {
    toml::from_str(
        r#"
[defaults]
to = "Tamil"

[api]
model = "config-api-model"
api_key_env = "SARVAM_PRIORITY_TEST_UNSET"

[local]
translate_model = "config-translate"
chat_model = "config-chat"

[chat]
host = "0.0.0.0"
port = 9000
"#,
    )
    .unwrap()
}

#[test]
fn test_config_values_used_when_cli_not_specified() {
    let resolved = resolve_config(&ResolveOptions::default(), &make_config_with_values());

    assert_eq!(resolved.default_language.as_deref(), Some("Tamil"));
    assert_eq!(resolved.api.model, "config-api-model");
    assert_eq!(resolved.local.translate_model, "config-translate");
    assert_eq!(resolved.local.chat_model, "config-chat");
    assert_eq!(resolved.chat.host, "0.0.0.0");
    assert_eq!(resolved.chat.port, 9000);
}

#[test]
fn test_built_in_defaults_fill_missing_fields() {
    let resolved = resolve_config(&ResolveOptions::default(), &make_config_with_values());

    assert_eq!(resolved.api.endpoint, "https://api.sarvam.ai");
    assert_eq!(resolved.api.timeout_secs, 30);
    assert_eq!(resolved.api.max_tokens, 512);
    assert_eq!(resolved.local.endpoint, "http://localhost:11434");
    assert_eq!(resolved.chat.max_new_tokens, 200);
}

#[test]
fn test_cli_to_overrides_config_to() {
    let options = ResolveOptions {
        to: Some("Bengali".to_string()),
        ..ResolveOptions::default()
    };
    let resolved = resolve_config(&options, &make_config_with_values());
    assert_eq!(resolved.default_language.as_deref(), Some("Bengali"));
}

#[test]
fn test_cli_model_overrides_config_model() {
    let options = ResolveOptions {
        api_model: Some("cli-api-model".to_string()),
        local_model: Some("cli-local".to_string()),
        ..ResolveOptions::default()
    };
    let resolved = resolve_config(&options, &make_config_with_values());

    assert_eq!(resolved.api.model, "cli-api-model");
    assert_eq!(resolved.local.translate_model, "cli-local");
    assert_eq!(resolved.local.chat_model, "cli-local");
}

#[test]
fn test_cli_host_and_port_override_config() {
    let options = ResolveOptions {
        host: Some("127.0.0.1".to_string()),
        port: Some(8080),
        ..ResolveOptions::default()
    };
    let resolved = resolve_config(&options, &make_config_with_values());

    assert_eq!(resolved.chat.host, "127.0.0.1");
    assert_eq!(resolved.chat.port, 8080);
}

#[test]
fn test_no_key_anywhere_disables_remote() {
    let resolved = resolve_config(&ResolveOptions::default(), &make_config_with_values());
    assert!(resolved.api_key.is_none());
}

#[test]
fn test_saved_config_round_trips_through_manager() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(temp_dir.path().join("sarvam").join("config.toml"));

    manager.save(&make_config_with_values()).unwrap();
    let loaded = manager.load_or_default().unwrap();
    let resolved = resolve_config(&ResolveOptions::default(), &loaded);

    assert_eq!(resolved.default_language.as_deref(), Some("Tamil"));
    assert_eq!(resolved.chat.port, 9000);
}
