use smachart_core::{chart, ChartSpec, DataSource};
use tracing::info;

use crate::cli::ChartArgs;
use crate::error::CliError;

use super::{fetch_and_compute, Computed};

pub async fn run(args: &ChartArgs, source: &dyn DataSource) -> Result<(), CliError> {
    let Computed { history, result } = fetch_and_compute(&args.history, source).await?;

    let spec = ChartSpec::for_symbol(&history.symbol, result.window, history.interval)
        .with_size(args.width, args.height);
    let spec = match &args.title {
        Some(title) => spec.with_title(title.clone()),
        None => spec,
    };

    chart::render(&result, &spec, &args.output)?;
    info!(path = %args.output.display(), title = %spec.title, "chart rendered");
    println!("Chart saved as {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::HistoryArgs;
    use smachart_core::YahooAdapter;

    fn chart_args(output: std::path::PathBuf, width: u32) -> ChartArgs {
        ChartArgs {
            history: HistoryArgs {
                symbol: String::from("MSFT"),
                period: String::from("1y"),
                interval: String::from("1d"),
                window: 50,
            },
            output,
            width,
            height: 500,
            title: None,
        }
    }

    #[tokio::test]
    async fn writes_png_for_mock_history() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("chart.png");

        run(&chart_args(output.clone(), 1000), &YahooAdapter::default())
            .await
            .expect("chart renders");

        let bytes = std::fs::read(&output).expect("chart exists");
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[tokio::test]
    async fn undersized_chart_maps_to_render_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let error = run(&chart_args(dir.path().join("chart.png"), 10), &YahooAdapter::default())
            .await
            .expect_err("must fail");
        assert_eq!(error.exit_code(), 7);
    }
}
