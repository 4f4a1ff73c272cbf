use anyhow::Result;

use sarvam_cli::cli::commands::{chat, configure, serve, translate};
use sarvam_cli::cli::{Args, Command};
use sarvam_cli::output::{self, OutputConfig};
use sarvam_cli::translation::{Outcome, print_languages, resolve_language};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args(std::env::args_os());

    output::init(OutputConfig::from_flags(args.quiet, args.no_color));
    init_tracing(&args);

    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Configure { show }) => {
            if show {
                configure::show_configure()?;
            } else {
                configure::run_configure()?;
            }
        }
        Some(Command::Chat { model }) => {
            chat::run_chat(chat::ChatOptions { model }).await?;
        }
        Some(Command::Serve { host, port, model }) => {
            serve::run_serve(serve::ServeOptions { host, port, model }).await?;
        }
        None => {
            if let Some(ref lang) = args.to {
                resolve_language(lang)?;
            }

            let options = translate::TranslateOptions {
                text: args.text,
                file: args.file,
                to: args.to,
                local: args.local,
                model: args.model,
            };
            if let Some(Outcome::Exhausted { .. }) = translate::run_translate(options).await? {
                std::process::exit(exitcode::UNAVAILABLE);
            }
        }
    }

    Ok(())
}

/// Diagnostic logs go to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(args: &Args) {
    let default = if args.verbose {
        "debug"
    } else if matches!(args.command, Some(Command::Serve { .. })) {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(!output::is_no_color())
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}
