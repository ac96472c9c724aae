//! Behavior-driven tests for chart rendering
//!
//! These tests verify HOW the system turns a computed moving average into an
//! image file and how it reports rendering failures.

use smachart_core::{
    chart, rolling, ChartSpec, DataSource, HistoryRequest, Interval, RenderError, RollingPoint,
    RollingResult, Sample, Series, Symbol, UtcDateTime, YahooAdapter,
};

fn stepped(values: &[Option<f64>]) -> Series {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let ts = UtcDateTime::from_unix_seconds(1_700_000_000 + index as i64 * 86_400)
                .expect("valid ts");
            Sample::new(ts, *value)
        })
        .collect()
}

#[tokio::test]
async fn when_mock_history_is_charted_system_writes_png_with_requested_size() {
    // Given: A year of mock closes and its 50-day mean
    let symbol = Symbol::parse("AAPL").expect("valid");
    let history = YahooAdapter::default()
        .history(HistoryRequest::daily_year(symbol.clone()))
        .await
        .expect("mock history");
    let result = rolling::compute(&history.closes, 50).expect("valid window");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("chart.png");

    // When: The chart is rendered with default labels
    let spec = ChartSpec::for_symbol(&symbol, 50, Interval::OneDay);
    chart::render(&result, &spec, &path).expect("render succeeds");

    // Then: A decodable image of the default size exists
    assert_eq!(spec.title, "AAPL stock price & 50-day moving average");
    let image = image::open(&path).expect("decodable image");
    assert_eq!((image.width(), image.height()), (1000, 500));
}

#[test]
fn when_custom_size_is_requested_system_honors_it() {
    // Given: A short observed series
    let result = rolling::compute(&stepped(&[Some(3.0), Some(4.0), Some(5.0), Some(4.5)]), 2)
        .expect("valid window");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("small.png");

    // When: A small chart is rendered
    let spec = ChartSpec::default().with_size(320, 200).with_title("Custom");
    chart::render(&result, &spec, &path).expect("render succeeds");

    // Then: The file has the requested dimensions
    let image = image::open(&path).expect("decodable image");
    assert_eq!((image.width(), image.height()), (320, 200));
}

#[test]
fn when_all_means_are_absent_system_still_renders_value_line() {
    // Given: Fewer samples than the window
    let result = rolling::compute(&stepped(&[Some(10.0), Some(11.0), Some(9.5)]), 50)
        .expect("short series is valid");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("short.png");

    // When: The chart is rendered
    let outcome = chart::render(&result, &ChartSpec::default(), &path);

    // Then: Rendering succeeds without a moving-average line
    assert!(outcome.is_ok());
    assert!(path.exists());
}

#[test]
fn when_series_is_empty_system_renders_axes_only() {
    // Given: An empty result
    let result = rolling::compute(&Series::default(), 5).expect("empty input is valid");

    // When: The chart is rasterized
    let image = chart::rasterize(&result, &ChartSpec::default()).expect("empty chart renders");

    // Then: The canvas has the default size
    assert_eq!(image.dimensions(), (1000, 500));
}

#[test]
fn when_extension_is_unknown_system_returns_image_error() {
    // Given: An output path without a known image extension
    let result = rolling::compute(&stepped(&[Some(1.0), Some(2.0)]), 1).expect("valid window");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("chart.unknown");

    // When: The chart is rendered
    let error = chart::render(&result, &ChartSpec::default(), &path).expect_err("must fail");

    // Then: The encoder rejects the format and no file is left behind
    assert!(matches!(error, RenderError::Image(_)));
    assert!(!path.exists());
}

#[test]
fn when_output_directory_is_missing_system_returns_io_error() {
    // Given: A path inside a directory that does not exist
    let result = rolling::compute(&stepped(&[Some(1.0), Some(2.0)]), 1).expect("valid window");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing").join("chart.png");

    // When: The chart is rendered
    let error = chart::render(&result, &ChartSpec::default(), &path).expect_err("must fail");

    // Then: The filesystem failure is surfaced
    assert!(matches!(error, RenderError::Io(_)));
}

#[test]
fn when_size_is_below_minimum_system_rejects_it() {
    // Given: A valid result
    let result = rolling::compute(&stepped(&[Some(1.0), Some(2.0)]), 1).expect("valid window");

    // When: A tiny chart is requested
    let error = chart::rasterize(&result, &ChartSpec::default().with_size(50, 50))
        .expect_err("must fail");

    // Then: The dimensions are reported
    assert!(matches!(
        error,
        RenderError::InvalidDimensions { width: 50, height: 50 }
    ));
}

#[test]
fn when_result_holds_non_finite_points_system_renders_them_as_gaps() {
    // Given: A hand-built result carrying infinities and NaN
    let raw = [1.0, f64::NEG_INFINITY, 2.0, f64::INFINITY, f64::NAN, 3.0];
    let points = raw
        .iter()
        .enumerate()
        .map(|(index, value)| RollingPoint {
            ts: UtcDateTime::from_unix_seconds(1_700_000_000 + index as i64 * 86_400)
                .expect("valid ts"),
            value: Some(*value),
            mean: Some(*value),
        })
        .collect();
    let result = RollingResult { window: 1, points };

    // When: The chart is rasterized
    let image = chart::rasterize(&result, &ChartSpec::default()).expect("renders without panic");

    // Then: The canvas is produced at the default size
    assert_eq!(image.dimensions(), (1000, 500));
}

#[test]
fn when_closes_overflow_window_sum_system_still_renders() {
    // Given: Closes near the largest finite double
    let result = rolling::compute(&stepped(&[Some(1e308), Some(1e308), Some(1.0)]), 2)
        .expect("valid window");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("huge.png");

    // When: The chart is rendered
    chart::render(&result, &ChartSpec::default(), &path).expect("render succeeds");

    // Then: A decodable image exists
    assert!(image::open(&path).is_ok());
}
