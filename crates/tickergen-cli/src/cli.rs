//! CLI argument definitions for tickergen.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `generate` | Fetch, render and publish the tickers page |
//! | `render` | Fetch and render, print HTML to stdout |
//! | `inspect` | Fetch and classify, print the view model as JSON |
//!
//! Every option can also be supplied through the environment variable
//! shown in `--help`.
//!
//! # Examples
//!
//! ```bash
//! # Scheduled run publishing to a bucket website endpoint
//! HOST_BUCKET_URL=https://tickers.s3.amazonaws.com tickergen generate
//!
//! # Local preview from a saved feed
//! tickergen --feed-file basedata.json render > tickers.html
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tickergen_core::{DEFAULT_FEED_URL, DEFAULT_OBJECT_KEY, DEFAULT_SCREENER_URL};

/// Tickers page generator
///
/// Downloads the instrument feed, keeps the configured instrument types and
/// publishes an HTML page listing tickers per type and listing country.
#[derive(Debug, Parser)]
#[command(name = "tickergen", author, version, about = "Instrument feed to static tickers page")]
pub struct Cli {
    /// URL of the instrument feed.
    #[arg(long, global = true, env = "TICKERGEN_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Read the feed from a local JSON file instead of fetching it.
    #[arg(long, global = true, env = "TICKERGEN_FEED_FILE")]
    pub feed_file: Option<PathBuf>,

    /// Comma-separated instrument types to publish (exact match).
    #[arg(
        long,
        global = true,
        env = "TICKERGEN_TYPES",
        value_delimiter = ',',
        default_value = "Részvény,ETF"
    )]
    pub types: Vec<String>,

    /// Screener URL the compact ticker list is appended to.
    #[arg(long, global = true, env = "TICKERGEN_SCREENER_URL", default_value = DEFAULT_SCREENER_URL)]
    pub screener_url: String,

    /// Google Analytics tracking id; the snippet is omitted when unset.
    #[arg(long, global = true, env = "GA_TRACKING_ID")]
    pub ga_tracking_id: Option<String>,

    /// Timeout for each HTTP request in milliseconds.
    #[arg(long, global = true, env = "TICKERGEN_TIMEOUT_MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Log output format.
    #[arg(long, global = true, env = "TICKERGEN_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Pretty-print JSON output of `inspect`.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable with file and line.
    Pretty,
    /// One JSON object per event.
    Json,
    /// Single-line human-readable.
    Compact,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the feed, render the page and publish it.
    Generate(GenerateArgs),

    /// Fetch the feed and print the rendered HTML to stdout.
    Render,

    /// Fetch the feed and print the view model as JSON.
    Inspect,
}

/// Arguments for the `generate` command.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Base URL of the bucket endpoint; the page is uploaded with PUT.
    #[arg(long, env = "HOST_BUCKET_URL", conflicts_with = "output_dir")]
    pub bucket_url: Option<String>,

    /// Write the page into this directory instead of uploading it.
    #[arg(long, env = "TICKERGEN_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Object key of the published page.
    #[arg(long, env = "TICKERGEN_OBJECT_KEY", default_value = DEFAULT_OBJECT_KEY)]
    pub object_key: String,
}
