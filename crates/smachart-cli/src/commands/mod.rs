mod chart;
mod sma;

use std::str::FromStr;

use smachart_core::{
    CoreError, DataSource, HistoryRequest, Interval, Period, PriceHistory, RollingMeanSeries,
    RollingResult, Symbol, YahooAdapter, YahooConfig,
};
use tracing::{info, warn};

use crate::cli::{Cli, Command, HistoryArgs};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let adapter = build_adapter(cli);

    match &cli.command {
        Command::Chart(args) => chart::run(args, &adapter).await,
        Command::Sma(args) => sma::run(args, &adapter).await,
    }
}

fn build_adapter(cli: &Cli) -> YahooAdapter {
    if cli.mock {
        info!("mock mode: serving synthetic prices");
        return YahooAdapter::default();
    }

    let config = YahooConfig::from_env();
    let config = match cli.timeout_ms {
        Some(timeout_ms) => config.with_timeout_ms(timeout_ms),
        None => config,
    };
    YahooAdapter::from_config(config)
}

/// Fetched history together with its rolling mean.
pub struct Computed {
    pub history: PriceHistory,
    pub result: RollingResult,
}

/// Validates arguments, fetches the close history and computes the mean.
///
/// The window is validated before any network call.
pub async fn fetch_and_compute(
    args: &HistoryArgs,
    source: &dyn DataSource,
) -> Result<Computed, CoreError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let interval = Interval::from_str(&args.interval)?;
    let period = Period::from_str(&args.period)?;
    let operator = RollingMeanSeries::new(args.window)?;

    info!(
        symbol = %symbol,
        period = %period,
        interval = %interval,
        source = %source.id(),
        "fetching price history"
    );
    let history = source
        .history(HistoryRequest::new(symbol, interval, period))
        .await?;

    if history.closes.len() < operator.window() {
        warn!(
            samples = history.closes.len(),
            window = operator.window(),
            "history is shorter than the window; moving average will be empty"
        );
    }

    let result = operator.compute(&history.closes)?;
    info!(
        samples = result.len(),
        defined = result.defined_means(),
        missing = history.closes.missing_count(),
        "computed moving average"
    );

    Ok(Computed { history, result })
}
