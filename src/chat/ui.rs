//! Terminal rendering for the chat REPL.

use super::command::slash_commands;
use super::engine::ChatEngine;
use super::history::ChatHistory;
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(model: &str) {
    println!(
        "{} {} - Chat",
        Style::header("sarvam"),
        Style::version(format!("v{VERSION}"))
    );
    println!("{} {}", Style::label("model"), Style::value(model));
    println!();
}

pub fn print_reply(reply: &str) {
    println!("{} {reply}", Style::bot("Bot:"));
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_cleared() {
    println!("{} Conversation cleared", Style::success("✓"));
    println!();
}

pub fn print_config(engine: &ChatEngine, endpoint: &str) {
    let params = engine.params();
    println!("{}", Style::header("Configuration"));
    println!("  {}           {}", Style::label("model"), Style::value(engine.model()));
    println!("  {}        {}", Style::label("endpoint"), Style::secondary(endpoint));
    println!(
        "  {}  {}",
        Style::label("max_new_tokens"),
        Style::value(params.max_new_tokens)
    );
    println!("  {}     {}", Style::label("temperature"), Style::value(params.temperature));
    if let Some(top_p) = params.top_p {
        println!("  {}           {}", Style::label("top_p"), Style::value(top_p));
    }
    println!();
}

pub fn print_history(history: &ChatHistory) {
    if history.is_empty() {
        println!("{}", Style::secondary("(no messages yet)"));
        println!();
        return;
    }
    for turn in history.turns() {
        println!("{} {}", Style::label("User:"), turn.user);
        println!("{} {}", Style::bot("Bot:"), turn.bot);
    }
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let width = slash_commands().iter().map(|(cmd, _)| cmd.len()).max().unwrap_or(0);
    for (cmd, description) in slash_commands() {
        println!(
            "  {}  {}",
            Style::command(format!("{cmd:<width$}")),
            Style::secondary(description)
        );
    }
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
