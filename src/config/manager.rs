use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::fs::atomic_write;
use crate::paths;

fn default_api_endpoint() -> String {
    "https://api.sarvam.ai".to_string()
}

fn default_api_model() -> String {
    "sarvam-translate".to_string()
}

fn default_api_key_env() -> String {
    "SARVAM_API_KEY".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_tokens() -> u32 {
    512
}

fn default_local_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_translate_model() -> String {
    "hf.co/sarvamai/sarvam-translate".to_string()
}

fn default_chat_model() -> String {
    "hf.co/sarvamai/sarvam-2b".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    7860
}

const fn default_max_new_tokens() -> u32 {
    200
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_top_p() -> f32 {
    0.9
}

/// Default settings in the `[defaults]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Default target language (name from the supported list).
    #[serde(default)]
    pub to: Option<String>,
}

/// Hosted translation API settings (`[api]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; `/v1/chat/completions` is appended.
    #[serde(default = "default_api_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_api_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// API key stored directly in config (not recommended).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_api_endpoint(),
            model: default_api_model(),
            api_key_env: default_api_key_env(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl ApiConfig {
    /// Gets the API key, preferring the environment variable over the config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(&self.api_key_env)
            && !key.trim().is_empty()
        {
            return Some(key.trim().to_string());
        }
        self.api_key.clone().filter(|k| !k.trim().is_empty())
    }
}

/// Local inference runtime settings (`[local]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    #[serde(default = "default_local_endpoint")]
    pub endpoint: String,
    /// Model used for the translation fallback.
    #[serde(default = "default_translate_model")]
    pub translate_model: String,
    /// Model used by `chat` and `serve`.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            endpoint: default_local_endpoint(),
            translate_model: default_translate_model(),
            chat_model: default_chat_model(),
        }
    }
}

/// Chat generation and web widget settings (`[chat]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/sarvam/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Default target language, if any. Selection still happens per run.
    pub default_language: Option<String>,
    pub api: ApiConfig,
    /// API key from environment or config; `None` disables the remote path.
    pub api_key: Option<String>,
    pub local: LocalConfig,
    pub chat: ChatConfig,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub to: Option<String>,
    /// Remote API model override.
    pub api_model: Option<String>,
    /// Local model override (translation fallback or chat, per command).
    pub local_model: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over built-in defaults.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> ResolvedConfig {
    let mut api = config_file.api.clone();
    if let Some(model) = &options.api_model {
        api.model.clone_from(model);
    }

    let mut local = config_file.local.clone();
    if let Some(model) = &options.local_model {
        local.translate_model.clone_from(model);
        local.chat_model.clone_from(model);
    }

    let mut chat = config_file.chat.clone();
    if let Some(host) = &options.host {
        chat.host.clone_from(host);
    }
    if let Some(port) = options.port {
        chat.port = port;
    }

    let api_key = api.get_api_key();

    ResolvedConfig {
        default_language: options.to.clone().or_else(|| config_file.defaults.to.clone()),
        api,
        api_key,
        local,
        chat,
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/sarvam/config.toml`
    /// or `~/.config/sarvam/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a manager for an explicit config file path.
    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        atomic_write(&self.config_path, &contents)
    }

    /// Loads the config file, using defaults when it does not exist.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            Ok(ConfigFile::default())
        }
    }
}
