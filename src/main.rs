//! Shiori main entry point
//!
//! Command-line interface: validates the documentation path, runs one
//! crawl session, and relays the progress event stream to stdout.

use anyhow::Context;
use clap::Parser;
use shiori::config::{load_config, Config};
use shiori::progress::{relay, ProgressSink};
use shiori::run_session;
use shiori::url::DocPath;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Idle period after which the relay emits a keepalive line
const KEEPALIVE_IDLE: Duration = Duration::from_secs(30);

/// Shiori: an offline snapshot tool for online API documentation
///
/// Shiori crawls the documentation tree for one crate, extracts the
/// structured content of every page, and aggregates it into a single
/// readable text document saved under a generated filename.
#[derive(Parser, Debug)]
#[command(name = "shiori")]
#[command(version)]
#[command(about = "Offline snapshot tool for online API documentation", long_about = None)]
struct Cli {
    /// Documentation path, e.g. wgpu/latest/wgpu
    #[arg(value_name = "DOC_PATH")]
    doc_path: String,

    /// Base name for the saved document
    #[arg(value_name = "OUTPUT")]
    output: String,

    /// Path to TOML configuration file (defaults apply without one)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    // Malformed paths are rejected here, before any network activity
    let doc_path = DocPath::parse(&cli.doc_path)?;
    tracing::info!(path = %doc_path, host = %config.host.base_url, "starting session");

    let session_id = format!(
        "{}-{}",
        std::process::id(),
        chrono::Utc::now().timestamp_millis()
    );

    let (sink, rx) = ProgressSink::channel();
    let relay_task = tokio::spawn(async move {
        let mut stdout = std::io::stdout();
        relay(rx, KEEPALIVE_IDLE, &mut stdout).await
    });

    let outcome = run_session(&config, &doc_path, &cli.output, &session_id, &sink).await;

    drop(sink);
    relay_task
        .await
        .context("progress relay task panicked")?
        .context("failed writing progress output")?;

    match &outcome.saved_as {
        Some(filename) => {
            tracing::info!(filename = %filename, "session complete");
            Ok(())
        }
        None if outcome.scraped => anyhow::bail!("scrape completed but the document was not saved"),
        None => anyhow::bail!("scraping failed"),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shiori=warn"),
            1 => EnvFilter::new("shiori=info"),
            2 => EnvFilter::new("shiori=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
