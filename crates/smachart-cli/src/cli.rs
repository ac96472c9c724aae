//! CLI argument definitions for smachart.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chart` | Fetch history, compute the moving average, write a chart image |
//! | `sma` | Fetch history and print the moving average as JSON |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--mock` | `false` | Use deterministic offline prices |
//! | `--timeout-ms` | `SMACHART_TIMEOUT_MS` or `10000` | Upstream request timeout |
//! | `--log-level` | `RUST_LOG` or `info` | Log filter for stderr output |
//!
//! # Examples
//!
//! ```bash
//! smachart chart
//! smachart chart MSFT --window 20 --output msft.png
//! smachart sma AAPL --period 6mo --window 10 --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Moving-average price charts from Yahoo Finance history.
#[derive(Debug, Parser)]
#[command(
    name = "smachart",
    author,
    version,
    about = "Chart a security's closing price against its simple moving average",
    long_about = "smachart fetches daily price history for one security, computes a \
trailing simple moving average over the close, and renders both lines to an image.\n\
\n\
Use 'smachart <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Serve deterministic synthetic prices instead of calling Yahoo Finance.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Upstream request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Log filter directive, e.g. `debug` or `smachart_core=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render close price and moving average to an image file.
    ///
    /// # Examples
    ///
    ///   smachart chart
    ///   smachart chart AAPL --window 50 --output chart.png
    ///   smachart chart TSLA --period 2y --width 1600 --height 800
    Chart(ChartArgs),

    /// Print the aligned close and moving-average series as JSON.
    ///
    /// # Examples
    ///
    ///   smachart sma AAPL
    ///   smachart sma MSFT --window 20 --pretty
    Sma(SmaArgs),
}

/// Inputs shared by every command that computes a moving average.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Market symbol (e.g., AAPL, MSFT, BRK-B).
    #[arg(default_value = "AAPL")]
    pub symbol: String,

    /// History range: 1mo, 3mo, 6mo, 1y, 2y, 5y or max.
    #[arg(long, default_value = "1y")]
    pub period: String,

    /// Sample interval: 1m, 5m, 15m, 1h or 1d.
    #[arg(long, default_value = "1d")]
    pub interval: String,

    /// Number of trailing samples averaged per point.
    #[arg(long, default_value_t = 50)]
    pub window: usize,
}

/// Arguments for the `chart` command.
#[derive(Debug, Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub history: HistoryArgs,

    /// Output image path; format follows the extension (png, jpg, bmp).
    #[arg(long, short, default_value = "chart.png")]
    pub output: PathBuf,

    /// Image width in pixels.
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = 500)]
    pub height: u32,

    /// Chart title; defaults to "<SYMBOL> stock price & <N>-day moving average".
    #[arg(long)]
    pub title: Option<String>,
}

/// Arguments for the `sma` command.
#[derive(Debug, Args)]
pub struct SmaArgs {
    #[command(flatten)]
    pub history: HistoryArgs,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}
