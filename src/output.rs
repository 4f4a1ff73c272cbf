//! Global output configuration and utilities.
//!
//! ## Design Principles
//!
//! - Translations and chat replies go to stdout (for piping)
//! - Status messages, progress, and prompts go to stderr
//! - Quiet mode suppresses non-essential output
//! - Colors can be disabled via flag or the `NO_COLOR` environment variable

use std::sync::OnceLock;

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // https://no-color.org/
            no_color: std::env::var_os("NO_COLOR").is_some(),
        }
    }
}

impl OutputConfig {
    /// Builds the configuration from CLI flags, honoring `NO_COLOR`.
    pub fn from_flags(quiet: bool, no_color: bool) -> Self {
        let defaults = Self::default();
        Self {
            quiet,
            no_color: no_color || defaults.no_color,
        }
    }
}

/// Initialize the global output configuration.
///
/// Call once at startup. Later calls are ignored.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

pub fn is_quiet() -> bool {
    config().quiet
}

pub fn is_no_color() -> bool {
    config().no_color
}

/// Print a status message to stderr (respects quiet mode).
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Print a message to stderr that is shown even in quiet mode.
///
/// Use for failures and decisions the user must see.
#[macro_export]
macro_rules! alert {
    ($($arg:tt)*) => {
        eprintln!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_config_default_not_quiet() {
        let config = OutputConfig::default();
        assert!(!config.quiet);
    }

    #[test]
    fn test_from_flags_no_color_flag_wins() {
        let config = OutputConfig::from_flags(true, true);
        assert!(config.quiet);
        assert!(config.no_color);
    }

    #[test]
    fn test_macros_usable_as_match_arm_expressions() {
        let outcomes: [Result<&str, &str>; 2] = [Ok("done"), Err("boom")];
        let mut printed = 0;
        for outcome in outcomes {
            match outcome {
                Ok(text) => crate::status!("{text}"),
                Err(message) => crate::alert!("{message}"),
            }
            printed += 1;
        }
        assert_eq!(printed, 2);
    }
}
