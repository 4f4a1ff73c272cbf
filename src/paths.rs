//! XDG-style path utilities for the configuration directory.
//!
//! Prefers XDG Base Directory conventions over OS-specific locations so the
//! config file lives in the same place on Linux and macOS.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "sarvam";

/// Returns the configuration directory for sarvam.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/sarvam` if `XDG_CONFIG_HOME` is set and non-empty
/// 2. `~/.config/sarvam` otherwise
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => Ok(home_dir()?.join(".config").join(APP_DIR)),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
