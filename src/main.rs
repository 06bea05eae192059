mod attachment;
mod chat;
mod config;
mod github;
mod links;
mod listener;
mod status;

use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use chat::{ChatSink, OutputFormat, TerminalSink};
use listener::Listener;

/// Give up on the input after this many read failures in a row.
const MAX_CONSECUTIVE_READ_ERRORS: u32 = 3;

/// PR Linker — listens to chat messages and replies to GitHub pull request
/// and issue links with a status summary.
#[derive(Parser, Debug)]
#[command(name = "pr-linker", version, about)]
struct Cli {
    /// Chat messages to handle. When omitted, every non-empty stdin line is
    /// handled as one message.
    messages: Vec<String>,

    /// Config file (defaults to .pr-linker.toml in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How replies are written to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let config = config::Config::load(cli.config.as_deref())?;
    debug!(?config, "loaded configuration");

    let client = github::GitHubClient::new(&config.github)?;
    let listener = Listener::new(client, config.listener);
    let sink = TerminalSink::new(cli.format);

    if cli.messages.is_empty() {
        info!("reading messages from stdin");
        let handled = handle_lines(std::io::stdin().lock(), &listener, &sink).await;
        debug!(messages = handled, "stdin closed");
    } else {
        for message in &cli.messages {
            listener.handle_message(message, &sink).await;
        }
    }

    info!("done");
    Ok(())
}

/// Handle every non-empty line of `reader` as one chat message and return
/// how many were handled. Lines that are not valid UTF-8 are decoded lossily
/// and read failures are logged, so a bad line never ends the session.
async fn handle_lines<R: BufRead>(mut reader: R, listener: &Listener, sink: &dyn ChatSink) -> usize {
    let mut handled = 0;
    let mut consecutive_errors = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                consecutive_errors = 0;
                let line = String::from_utf8_lossy(&buf);
                let message = line.trim();
                if message.is_empty() {
                    continue;
                }
                listener.handle_message(message, sink).await;
                handled += 1;
            }
            Err(e) => {
                consecutive_errors += 1;
                warn!(error = %e, consecutive_errors, "failed to read message");
                if consecutive_errors >= MAX_CONSECUTIVE_READ_ERRORS {
                    warn!("too many read failures, stopping input");
                    break;
                }
            }
        }
    }

    handled
}
