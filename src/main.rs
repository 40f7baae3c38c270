use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use ts3tts::config::file::default_settings_path;
use ts3tts::speech::build_command_line;
use ts3tts::{Config, Plugin, ProcessLauncher, TextMessageEvent};

/// Ts3TTS - speak chat messages through an external TTS executable
#[derive(Parser)]
#[command(name = "ts3tts", version, about)]
struct Cli {
    /// Settings file (defaults to <config dir>/Ts3TTS/settings.ini)
    #[arg(short, long, env = "TS3TTS_SETTINGS")]
    settings: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Speak messages read from stdin, one per line (default)
    Run {
        /// Treat each line as message text instead of a JSON event
        #[arg(long)]
        plain: bool,
    },
    /// Show what would be spoken for a message without launching anything
    Filter {
        /// Message text
        text: String,
    },
    /// Validate the settings file and show the loaded configuration
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info,ts3tts=info",
        1 => "info,ts3tts=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match cli.settings {
        Some(path) => path,
        None => default_settings_path().context("no config directory for default settings file")?,
    };

    let config = Config::load(&settings)
        .with_context(|| format!("failed to load settings from {}", settings.display()))?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command.unwrap_or(Command::Run { plain: false }) {
        Command::Run { plain } => run_events(config, plain).await,
        Command::Filter { text } => {
            show_filtered(config, &text);
            Ok(())
        }
        Command::Check => check(&config),
    }
}

/// Feed stdin lines to the plugin until EOF or Ctrl-C
async fn run_events(config: Config, plain: bool) -> anyhow::Result<()> {
    let mut plugin = Plugin::from_config(config, ProcessLauncher::new());
    plugin.register_plugin_id(concat!("ts3tts-cli-", env!("CARGO_PKG_VERSION")));

    let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tracing::info!(plain, "reading message events from stdin");

    loop {
        tokio::select! {
            segment = lines.next_segment() => {
                let Some(mut line) = segment.context("failed to read stdin")? else {
                    break;
                };
                if line.last() == Some(&b'\r') {
                    line.pop();
                }

                let event = if plain {
                    TextMessageEvent {
                        message: line,
                        ..TextMessageEvent::default()
                    }
                } else {
                    if line.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }
                    match serde_json::from_slice::<TextMessageEvent>(&line) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!(error = %e, "skipping malformed event");
                            continue;
                        }
                    }
                };

                plugin.on_text_message(&event);
            }
            _ = &mut shutdown => {
                tracing::info!("interrupted");
                break;
            }
        }
    }

    plugin.shutdown();
    Ok(())
}

fn show_filtered(config: Config, text: &str) {
    let plugin = Plugin::from_config(config, ProcessLauncher::new());
    let speech = plugin.dispatcher().speech_text(text.as_bytes());

    if speech.is_empty() {
        println!("(nothing to speak)");
        return;
    }

    println!("text:    {}", String::from_utf16_lossy(&speech));
    println!(
        "command: {} {}",
        plugin.config().path.display(),
        build_command_line(&plugin.config().cmd, &speech)
    );
}

fn check(config: &Config) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);

    match which::which(&config.path) {
        Ok(resolved) => println!("executable: {}", resolved.display()),
        Err(e) => println!("executable: not found ({e})"),
    }

    Ok(())
}
