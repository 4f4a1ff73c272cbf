use anyhow::{Context, Result};
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::engine::ChatEngine;
use super::history::ChatHistory;
use super::ui;
use crate::local::PullStatus;
use crate::ui::{DownloadBar, Spinner, is_prompt_cancelled};

/// A terminal chat with a local model.
///
/// The history lives as long as the session; `/clear` resets it without
/// reloading the model.
pub struct ChatSession {
    engine: ChatEngine,
    endpoint: String,
    history: ChatHistory,
}

impl ChatSession {
    pub fn new(engine: ChatEngine, endpoint: String) -> Self {
        Self {
            engine,
            endpoint,
            history: ChatHistory::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(self.engine.model());

        let bar = DownloadBar::new(self.engine.model());
        self.engine
            .load(&|status: &PullStatus| bar.update(status))
            .await
            .with_context(|| format!("Failed to load chat model {}", self.engine.model()))?;
        bar.finish();

        let render_config = render_config();

        loop {
            let line = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type a message, /help for commands, Ctrl+C to quit")
                .prompt();

            match line {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    Input::Message(message) => self.reply_and_print(&message).await,
                },
                Err(e) if is_prompt_cancelled(&e) => {
                    println!();
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Returns `false` when the session should end.
    fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Clear => {
                self.history.clear();
                ui::print_cleared();
            }
            SlashCommand::Config => ui::print_config(&self.engine, &self.endpoint),
            SlashCommand::Help => ui::print_help(),
            SlashCommand::History => ui::print_history(&self.history),
            SlashCommand::Quit => return false,
            SlashCommand::Unknown(cmd) => ui::print_error(&format!("Unknown command: /{cmd}")),
        }
        true
    }

    async fn reply_and_print(&mut self, message: &str) {
        let spinner = Spinner::new("Thinking...");
        let result = self.engine.reply(&mut self.history, message).await;
        spinner.stop();

        match result {
            Ok(reply) => ui::print_reply(&reply),
            Err(e) => ui::print_error(&format!("{e:#}")),
        }
    }
}

fn render_config() -> RenderConfig<'static> {
    let prompt_style = Styled::new("❯")
        .with_fg(Color::LightBlue)
        .with_attr(Attributes::BOLD);
    let mut render_config = RenderConfig::default()
        .with_prompt_prefix(prompt_style)
        .with_answered_prompt_prefix(prompt_style);

    render_config.option = StyleSheet::new().with_fg(Color::Grey);
    render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));
    render_config
}
