use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sarvam")]
#[command(about = "Translate text into Indian languages, with an on-device fallback")]
#[command(version)]
pub struct Args {
    /// Text to translate (otherwise --file, piped stdin, or a prompt).
    /// Put `--` first if the text starts with a command name.
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Target language, by menu number or name (e.g. 1, Hindi, tamil)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// File to translate
    #[arg(short = 'f', long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Skip the cloud API and translate on this machine
    #[arg(long)]
    pub local: bool,

    /// Model name (the cloud API model, or the local model with --local)
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Hide status messages and progress bars
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Show debug logs on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Flags that only make sense for translation.
const TRANSLATE_FLAGS: [&str; 7] = ["-t", "--to", "-f", "--file", "-m", "--model", "--local"];

impl Args {
    /// Parses `argv`, exiting with clap's message on error.
    pub fn parse_args<I, T>(argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_args(argv).unwrap_or_else(|err| err.exit())
    }

    /// Like [`Parser::try_parse_from`], except that once a translation flag
    /// has been given, a later word naming a subcommand is read as text.
    pub fn try_parse_args<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        let mut command = Self::command();
        if translate_flag_leads(&argv) {
            command = command.args_conflicts_with_subcommands(true);
        }
        let mut matches = command.try_get_matches_from(argv)?;
        Self::from_arg_matches_mut(&mut matches)
    }
}

/// True when a translation flag appears before the first bare word.
fn translate_flag_leads(argv: &[OsString]) -> bool {
    for arg in argv.iter().skip(1) {
        let Some(arg) = arg.to_str() else {
            return false;
        };
        if arg == "--" || !arg.starts_with('-') {
            return false;
        }
        let name = arg.split_once('=').map_or(arg, |(name, _)| name);
        let attached_short = !arg.starts_with("--")
            && TRANSLATE_FLAGS
                .iter()
                .any(|flag| flag.len() == 2 && arg.starts_with(flag));
        let is_translate_flag = TRANSLATE_FLAGS.contains(&name) || attached_short;
        if is_translate_flag {
            return true;
        }
    }
    false
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported target languages
    Languages,
    /// Configure sarvam settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// Chat with a local model in the terminal
    Chat {
        /// Local chat model name
        #[arg(short = 'm', long)]
        model: Option<String>,
    },
    /// Serve a browser chat widget backed by a local model
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short = 'p', long)]
        port: Option<u16>,

        /// Local chat model name
        #[arg(short = 'm', long)]
        model: Option<String>,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_positional_words_collected() {
        let args = Args::try_parse_from(["sarvam", "-t", "Tamil", "good", "morning"]).unwrap();
        assert_eq!(args.text, vec!["good", "morning"]);
        assert_eq!(args.to.as_deref(), Some("Tamil"));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_text_may_start_with_command_name_after_flag() {
        let args = Args::try_parse_args(["sarvam", "-t", "Hindi", "chat", "with", "me"]).unwrap();
        assert_eq!(args.text, vec!["chat", "with", "me"]);
        assert_eq!(args.to.as_deref(), Some("Hindi"));
        assert!(args.command.is_none());

        let args = Args::try_parse_args(["sarvam", "--to=Tamil", "serve", "dinner"]).unwrap();
        assert_eq!(args.text, vec!["serve", "dinner"]);
    }

    #[test]
    fn test_double_dash_forces_text() {
        let args = Args::try_parse_args(["sarvam", "--", "languages", "of", "India"]).unwrap();
        assert_eq!(args.text, vec!["languages", "of", "India"]);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_subcommands_still_parse_after_global_flags() {
        let args = Args::try_parse_args(["sarvam", "-q", "chat"]).unwrap();
        assert!(args.quiet);
        assert!(matches!(args.command, Some(Command::Chat { model: None })));

        let args = Args::try_parse_args(["sarvam", "serve", "-m", "tiny"]).unwrap();
        assert!(matches!(args.command, Some(Command::Serve { .. })));
    }

    #[test]
    fn test_file_conflicts_with_text() {
        assert!(Args::try_parse_from(["sarvam", "-f", "in.txt", "hello"]).is_err());
    }

    #[test]
    fn test_serve_options() {
        let args = Args::try_parse_from(["sarvam", "serve", "--port", "8080", "-q"]).unwrap();
        assert!(args.quiet);
        match args.command {
            Some(Command::Serve { port, host, model }) => {
                assert_eq!(port, Some(8080));
                assert!(host.is_none());
                assert!(model.is_none());
            }
            other => panic!("expected serve, got {other:?}"),
        }
    }
}
