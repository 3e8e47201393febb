//! Terminal host and entry point.
//!
//! Wires stdin to the session loop and the session loop to stdout:
//!
//! ```text
//! ┌─────────────────┐  HostSignal  ┌──────────────────┐  ViewModel  ┌──────────────────┐
//! │  stdin lines    │ ───────────► │  Session::run    │ ──────────► │ TerminalRenderer │
//! └─────────────────┘    mpsc      └──────────────────┘             └──────────────────┘
//!                                          │  ▲
//!                                          ▼  │
//!                                     TmdbClient (HTTP)
//! ```
//!
//! # Input
//!
//! Each line replaces the search field, except commands:
//!
//! - `:more` or an empty line: scrolled near the end of the list
//! - `:clear`: back to the trending listing
//! - `:open <id>`: show movie details
//! - `:back`: return to the list
//! - `:quit`: exit
//!
//! Everything runs on one thread; the session is not `Send`.

use clap::Parser;
use reelscout::observability::init_tracing;
use reelscout::remote::TmdbClient;
use reelscout::ui::TerminalRenderer;
use reelscout::{infrastructure, Config, HostSignal, Result, Session};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Browse trending movies and search a TMDB-compatible API from the terminal
#[derive(Parser, Debug)]
#[command(name = "reelscout", version, about, long_about = None)]
struct Args {
    /// Configuration file (default: ~/.config/reelscout/config.toml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// v3 API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Quiet interval before a typed term is searched
    #[arg(long, value_name = "MS")]
    debounce_ms: Option<u64>,

    /// Tracing level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    trace_level: Option<String>,

    /// Show the poster URL best suited to this pixel width under each row
    #[arg(long, value_name = "PX")]
    poster_width: Option<u32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting");
            eprintln!("reelscout: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    config.validate()?;
    init_tracing(&config);

    tracing::info!(base_url = %config.api_base_url, language = %config.language, "starting");

    let client = TmdbClient::new(&config)?;
    let renderer = TerminalRenderer::stdout(config.poster_width);
    let session = Session::new(client, renderer, config.debounce());

    let (tx, rx) = mpsc::channel(32);
    let session = session.run(rx);
    tokio::pin!(session);

    let state = tokio::select! {
        state = &mut session => state?,
        () = forward_stdin(tx) => session.await?,
    };

    tracing::info!(term = %state.term, page = state.page, "bye");
    Ok(())
}

/// File (explicit or default location), then environment, then flags.
fn load_config(args: &Args) -> Result<Config> {
    let file = match &args.config {
        Some(path) => Some(Config::load(path)?),
        None => match infrastructure::config_file() {
            Some(path) if path.is_file() => Some(Config::load(&path)?),
            _ => None,
        },
    };

    let mut config = file.unwrap_or_default().with_env_overrides();

    if let Some(key) = &args.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(ms) = args.debounce_ms {
        config.debounce_ms = ms;
    }
    if let Some(level) = &args.trace_level {
        config.trace_level = Some(level.clone());
    }
    if args.poster_width.is_some() {
        config.poster_width = args.poster_width;
    }
    Ok(config)
}

/// Reads stdin until EOF or `:quit`, forwarding parsed lines.
async fn forward_stdin(tx: mpsc::Sender<HostSignal>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed");
                break;
            }
        };

        let Some(signal) = parse_line(&line) else {
            eprintln!("unrecognized command: {}", line.trim());
            continue;
        };
        let quit = signal == HostSignal::Shutdown;
        if tx.send(signal).await.is_err() || quit {
            break;
        }
    }
}

/// Maps one input line to a host signal. `None` for malformed commands.
fn parse_line(line: &str) -> Option<HostSignal> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Some(HostSignal::ScrollNear);
    }
    let Some(command) = trimmed.strip_prefix(':') else {
        return Some(HostSignal::Input(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("more"), None, None) => Some(HostSignal::ScrollNear),
        (Some("clear"), None, None) => Some(HostSignal::Input(String::new())),
        (Some("back"), None, None) => Some(HostSignal::Back),
        (Some("quit" | "q"), None, None) => Some(HostSignal::Shutdown),
        (Some("open"), Some(id), None) => id.parse().ok().map(HostSignal::Open),
        _ => None,
    }
}
