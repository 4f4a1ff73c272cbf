//! # sarvam - Indian-language translation CLI
//!
//! `sarvam` translates text into one of 22 Indian languages or English
//! through a hosted chat-completions API. When no API key is configured, or
//! the API call fails, it offers to run a model on this machine instead,
//! after two explicit confirmations.
//!
//! It also ships a small chat demo on top of a local model, as a terminal
//! REPL (`sarvam chat`) or a browser widget (`sarvam serve`).
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate words from the command line
//! sarvam --to Tamil "Good morning, how are you?"
//!
//! # Translate a file, picking the language from the menu
//! sarvam -f ./notes.txt
//!
//! # Pipe text in
//! echo "See you tomorrow" | sarvam --to 1
//!
//! # Chat in the browser
//! sarvam serve --port 7860
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/sarvam/config.toml`:
//!
//! ```toml
//! [defaults]
//! to = "Hindi"
//!
//! [api]
//! endpoint = "https://api.sarvam.ai"
//! api_key_env = "SARVAM_API_KEY"
//!
//! [local]
//! endpoint = "http://localhost:11434"
//! ```

/// Chat history, reply generation, and the REPL and web front ends.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// Client for the on-device model runtime.
pub mod local;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Language selection, the remote API client, and strategy dispatch.
pub mod translation;

/// Terminal UI components (spinner, progress bars, colors).
pub mod ui;
