//! Consistent styling utilities for CLI output.
//!
//! Provides color and formatting helpers using owo-colors. Every helper
//! falls back to plain text when colors are disabled.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::output;

/// Styles for different semantic elements.
pub struct Style;

fn paint<T: Display>(text: T, styled: impl FnOnce(&T) -> String) -> String {
    if output::is_no_color() {
        text.to_string()
    } else {
        styled(&text)
    }
}

impl Style {
    /// Style for section headers (e.g., "Configuration", "Available commands")
    pub fn header<T: Display>(text: T) -> String {
        paint(text, |t| t.bold().to_string())
    }

    /// Style for labels/keys (e.g., "endpoint", "model")
    pub fn label<T: Display>(text: T) -> String {
        paint(text, |t| t.dimmed().to_string())
    }

    /// Style for primary values (e.g., language names, model names)
    pub fn value<T: Display>(text: T) -> String {
        paint(text, |t| t.cyan().to_string())
    }

    /// Style for secondary/supplementary info (e.g., endpoints, hints)
    pub fn secondary<T: Display>(text: T) -> String {
        paint(text, |t| t.dimmed().to_string())
    }

    pub fn success<T: Display>(text: T) -> String {
        paint(text, |t| t.green().to_string())
    }

    pub fn error<T: Display>(text: T) -> String {
        paint(text, |t| t.red().bold().to_string())
    }

    pub fn warning<T: Display>(text: T) -> String {
        paint(text, |t| t.yellow().to_string())
    }

    /// Style for slash commands (e.g., "/clear", "/help")
    pub fn command<T: Display>(text: T) -> String {
        paint(text, |t| t.green().to_string())
    }

    /// Style for menu numbers
    pub fn code<T: Display>(text: T) -> String {
        paint(text, |t| t.yellow().to_string())
    }

    /// Style for mode banners (e.g., "[Mode]", "[Local]")
    pub fn tag<T: Display>(text: T) -> String {
        paint(text, |t| t.magenta().bold().to_string())
    }

    /// Style for the chat bot's name
    pub fn bot<T: Display>(text: T) -> String {
        paint(text, |t| t.blue().bold().to_string())
    }

    pub fn version<T: Display>(text: T) -> String {
        paint(text, |t| t.dimmed().to_string())
    }
}
