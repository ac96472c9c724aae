use serde::Serialize;

use smachart_core::{DataSource, Interval, Period, RollingPoint, Symbol};

use crate::cli::SmaArgs;
use crate::error::CliError;

use super::{fetch_and_compute, Computed};

#[derive(Debug, Serialize)]
struct SmaResponseData<'a> {
    symbol: &'a Symbol,
    interval: Interval,
    period: Period,
    currency: Option<&'a str>,
    window: usize,
    points: &'a [RollingPoint],
}

pub async fn run(args: &SmaArgs, source: &dyn DataSource) -> Result<(), CliError> {
    let rendered = render(args, source).await?;
    println!("{rendered}");
    Ok(())
}

async fn render(args: &SmaArgs, source: &dyn DataSource) -> Result<String, CliError> {
    let Computed { history, result } = fetch_and_compute(&args.history, source).await?;

    let data = SmaResponseData {
        symbol: &history.symbol,
        interval: history.interval,
        period: history.period,
        currency: history.currency.as_deref(),
        window: result.window,
        points: &result.points,
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&data)?
    } else {
        serde_json::to_string(&data)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::HistoryArgs;
    use smachart_core::YahooAdapter;

    #[tokio::test]
    async fn emits_null_mean_until_window_fills() {
        let args = SmaArgs {
            history: HistoryArgs {
                symbol: String::from("AAPL"),
                period: String::from("1mo"),
                interval: String::from("1d"),
                window: 3,
            },
            pretty: false,
        };

        let rendered = render(&args, &YahooAdapter::default()).await.expect("renders");
        let json: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");

        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["period"], "1mo");
        assert_eq!(json["window"], 3);
        let points = json["points"].as_array().expect("points array");
        assert_eq!(points.len(), 30);
        assert!(points[0]["mean"].is_null());
        assert!(points[1]["mean"].is_null());
        assert!(points[2]["mean"].is_number());
    }
}
