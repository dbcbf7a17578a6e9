//! CLI argument definitions for Glance.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `assets` | List catalog assets sorted by symbol |
//! | `metrics` | List metrics, optionally only those supporting an asset |
//! | `series` | Fetch raw points for a metric path and asset |
//! | `summary` | Resolve a selection and print headline numbers |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `GLANCE_TIMEOUT_MS` or `10000` | Request timeout in ms |
//! | `--api-key` | `GLASSNODE_API_KEY` | API key override |
//! | `--verbose` | `false` | Debug logging on stderr |
//!
//! # Examples
//!
//! ```bash
//! # Which metrics can I chart for ETH?
//! glance metrics --asset ETH --sort-by-name --format table
//!
//! # Raw daily points
//! glance series /addresses/profit_count BTC --pretty
//!
//! # Headline numbers for one widget
//! glance summary BTC 42 --format table
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Glance - on-chain metrics at a glance
///
/// Browse the Glassnode asset and metric catalog and summarize metric series.
#[derive(Debug, Parser)]
#[command(
    name = "glance",
    author,
    version,
    about = "On-chain metric catalog and series CLI",
    long_about = "Glance lists the assets and metrics available from Glassnode, \
fetches daily metric series, and reduces them to the headline numbers a widget shows.\n\
\n\
An API key is required: set GLASSNODE_API_KEY or pass --api-key.\n\
\n\
Use 'glance <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - json: Single JSON object (default)
    /// - table: Aligned columns for terminals
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Request timeout in milliseconds. Overrides GLANCE_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// API key to use instead of GLASSNODE_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Aligned table for terminal display.
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all assets, sorted by symbol.
    Assets,
    /// List metrics.
    Metrics(MetricsArgs),
    /// Fetch the raw series of a metric for one asset.
    Series(SeriesArgs),
    /// Summarize a metric for one asset.
    Summary(SummaryArgs),
}

#[derive(Debug, Args)]
pub struct MetricsArgs {
    /// Only metrics available for this asset symbol (case-insensitive).
    #[arg(long)]
    pub asset: Option<String>,

    /// Order by metric name instead of catalog order.
    #[arg(long, default_value_t = false)]
    pub sort_by_name: bool,
}

#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Metric path, e.g. /addresses/profit_count.
    pub path: String,

    /// Asset symbol, e.g. BTC.
    pub asset: String,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Asset symbol, e.g. BTC.
    pub asset: String,

    /// Catalog metric id (see `glance metrics`).
    pub metric_id: String,
}
