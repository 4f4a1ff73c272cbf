//! Supported target languages and menu selection.

use anyhow::Result;

use crate::ui::Style;

/// Supported target languages, in menu order.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "Hindi",
    "Marathi",
    "Gujarati",
    "Bengali",
    "Tamil",
    "Telugu",
    "Kannada",
    "Malayalam",
    "Punjabi",
    "Odia",
    "Assamese",
    "Urdu",
    "Konkani",
    "Sanskrit",
    "Nepali",
    "Manipuri",
    "Bodo",
    "Dogri",
    "Santali",
    "Maithili",
    "Sindhi",
    "Kashmiri",
    "English",
];

/// Prints the numbered language menu to stderr.
pub fn print_language_menu() {
    eprintln!();
    eprintln!(
        "{}",
        Style::header("Choose target language (enter number or language name):")
    );
    for line in menu_lines() {
        eprintln!("{line}");
    }
    eprintln!();
}

/// Prints the numbered language list to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported target languages"));
    for line in menu_lines() {
        println!("{line}");
    }
}

fn menu_lines() -> impl Iterator<Item = String> {
    SUPPORTED_LANGUAGES
        .iter()
        .enumerate()
        .map(|(i, name)| format!("  {}. {}", Style::code(format!("{:02}", i + 1)), name))
}

/// Matches a raw menu answer against the supported languages.
///
/// All-digit input is a 1-based index; anything else must equal a language
/// name, ignoring case. Returns `None` when nothing matches.
pub fn pick_language(choice: &str) -> Option<&'static str> {
    let choice = choice.trim();
    if choice.is_empty() {
        return None;
    }

    if choice.bytes().all(|b| b.is_ascii_digit()) {
        let index = choice.parse::<usize>().ok()?.checked_sub(1)?;
        return SUPPORTED_LANGUAGES.get(index).copied();
    }

    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.eq_ignore_ascii_case(choice))
        .copied()
}

/// Like [`pick_language`], but with an instructional error for `--to`.
pub fn resolve_language(choice: &str) -> Result<&'static str> {
    pick_language(choice).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid language: '{choice}'\n\n\
             Use a number from 1 to {} or a name such as Hindi, Tamil, English.\n\
             Run 'sarvam languages' to see the full list.",
            SUPPORTED_LANGUAGES.len()
        )
    })
}
