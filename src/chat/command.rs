use inquire::autocompletion::{Autocomplete, Replacement};

// (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/clear", "Forget the conversation so far"),
    ("/config", "Show model and sampling settings"),
    ("/help", "Show available commands"),
    ("/history", "Show the conversation so far"),
    ("/quit", "Leave the chat"),
];

/// Completes slash commands as the user types them.
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') {
            return Ok(vec![]);
        }

        Ok(SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        Ok(highlighted_suggestion
            .and_then(|s| s.split_whitespace().next().map(str::to_string)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Clear,
    Config,
    Help,
    History,
    Quit,
    Unknown(String),
}

/// One line typed at the chat prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Message(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Message(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let command = match cmd.split_whitespace().next() {
        Some("clear" | "reset") => SlashCommand::Clear,
        Some("config") => SlashCommand::Config,
        Some("help" | "?") => SlashCommand::Help,
        Some("history") => SlashCommand::History,
        Some("quit" | "exit" | "q") => SlashCommand::Quit,
        _ => SlashCommand::Unknown(cmd.trim().to_string()),
    };
    Input::Command(command)
}

/// Command names with their descriptions, for the help screen.
pub fn slash_commands() -> &'static [(&'static str, &'static str)] {
    SLASH_COMMANDS
}
