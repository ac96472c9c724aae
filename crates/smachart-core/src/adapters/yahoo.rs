use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::YahooConfig;
use crate::data_source::{DataSource, HistoryRequest, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{PriceHistory, ProviderId, Sample, Series, Symbol, UtcDateTime};

const MAX_FAKE_SAMPLES: i64 = 5_000;

/// Yahoo Finance chart adapter supporting both real API calls and mock mode.
///
/// `YahooAdapter::default()` never touches the network and serves a
/// deterministic synthetic series seeded from the symbol.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Option<Arc<dyn HttpClient>>,
    config: YahooConfig,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self {
            http_client: None,
            config: YahooConfig::default(),
        }
    }
}

impl YahooAdapter {
    /// Live adapter using reqwest with the configured user agent.
    pub fn from_config(config: YahooConfig) -> Self {
        let client = ReqwestHttpClient::new(&config.user_agent);
        Self::with_http_client(Arc::new(client), config)
    }

    /// Live adapter over a caller-supplied transport.
    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: YahooConfig) -> Self {
        Self {
            http_client: Some(http_client),
            config,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.http_client.is_none()
    }

    fn chart_url(&self, req: &HistoryRequest) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}&includePrePost=false",
            self.config.base_url,
            urlencoding::encode(req.symbol.as_str()),
            req.period.as_str(),
            req.interval.as_str(),
        )
    }

    async fn fetch_real_history(
        &self,
        http_client: &Arc<dyn HttpClient>,
        req: &HistoryRequest,
    ) -> Result<PriceHistory, SourceError> {
        let endpoint = self.chart_url(req);
        debug!(url = %endpoint, "requesting yahoo chart");

        let request = HttpRequest::get(&endpoint)
            .with_header("referer", "https://finance.yahoo.com/")
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);

        let response = http_client.execute(request).await.map_err(|error| {
            warn!(error = %error, "yahoo transport failure");
            if error.retryable() {
                SourceError::unavailable(format!("yahoo transport error: {}", error.message()))
            } else {
                SourceError::internal(format!("yahoo transport error: {}", error.message()))
            }
        })?;

        debug!(status = response.status, bytes = response.body.len(), "yahoo chart response");

        if response.status == 429 {
            return Err(SourceError::rate_limited("yahoo returned status 429"));
        }
        if !response.is_success() {
            // Not-found symbols come back as 404 with a chart.error body.
            if let Ok(payload) = serde_json::from_str::<YahooChartResponse>(&response.body) {
                if let Some(error) = payload.chart.error {
                    return Err(error.into_source_error());
                }
            }
            return Err(SourceError::unavailable(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        parse_chart_response(&response.body, req)
    }

    fn fetch_fake_history(&self, req: &HistoryRequest) -> Result<PriceHistory, SourceError> {
        let step = req.interval.step();
        let count = (req.period.span().whole_seconds() / step.whole_seconds())
            .clamp(1, MAX_FAKE_SAMPLES) as usize;
        let now = UtcDateTime::now();
        let seed = symbol_seed(&req.symbol);
        let base = 80.0 + (seed % 120) as f64;

        let closes = (0..count)
            .map(|index| {
                let back = step * (count - index - 1) as i32;
                let x = index as f64;
                let drift = x * 0.04;
                let swing = 6.0 * (x / 17.0 + (seed % 7) as f64).sin();
                let wobble = 1.5 * (x / 3.0).cos();
                Sample::observed(now.saturating_sub(back), base + drift + swing + wobble)
            })
            .collect::<Series>();

        Ok(PriceHistory::new(req.symbol.clone(), req.interval, req.period, closes)
            .with_currency("USD"))
    }
}

impl DataSource for YahooAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            match &self.http_client {
                Some(http_client) => self.fetch_real_history(http_client, &req).await,
                None => self.fetch_fake_history(&req),
            }
        })
    }
}

/// Normalizes a `v8/finance/chart` payload into close-price samples.
///
/// `null` closes are kept as absent samples. Samples whose timestamp does not
/// advance past the previous one are dropped.
fn parse_chart_response(body: &str, req: &HistoryRequest) -> Result<PriceHistory, SourceError> {
    let payload: YahooChartResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::internal(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = payload.chart.error {
        return Err(error.into_source_error());
    }

    let result = payload
        .chart
        .result
        .into_iter()
        .flatten()
        .next()
        .ok_or_else(|| SourceError::internal("no chart data in response"))?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|quote| quote.close)
        .unwrap_or_default();

    let mut samples = Vec::with_capacity(result.timestamp.len());
    let mut last_ts: Option<UtcDateTime> = None;
    for (index, seconds) in result.timestamp.iter().copied().enumerate() {
        let ts = UtcDateTime::from_unix_seconds(seconds)
            .map_err(|e| SourceError::internal(format!("invalid timestamp: {e}")))?;
        if last_ts.is_some_and(|last| ts <= last) {
            warn!(index, ts = %ts, "dropping out-of-order yahoo sample");
            continue;
        }
        last_ts = Some(ts);

        let sample = match closes.get(index).copied().flatten() {
            Some(close) => Sample::observed(ts, close),
            None => Sample::missing(ts),
        };
        samples.push(sample);
    }

    let series = Series::new(samples);
    debug!(
        samples = series.len(),
        missing = series.missing_count(),
        "normalized yahoo chart"
    );

    let history = PriceHistory::new(req.symbol.clone(), req.interval, req.period, series);
    Ok(match result.meta.and_then(|meta| meta.currency) {
        Some(currency) => history.with_currency(currency),
        None => history,
    })
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl YahooChartError {
    fn into_source_error(self) -> SourceError {
        let code = self.code.unwrap_or_else(|| String::from("unknown"));
        let description = self.description.unwrap_or_default();
        SourceError::unavailable(format!("yahoo chart API error: {code}: {description}"))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

fn symbol_seed(symbol: &Symbol) -> u64 {
    symbol.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Interval, Period};

    fn request() -> HistoryRequest {
        HistoryRequest::daily_year(Symbol::parse("AAPL").expect("valid symbol"))
    }

    #[test]
    fn builds_chart_url_from_request() {
        let adapter = YahooAdapter::from_config(
            YahooConfig::default().with_base_url("http://localhost:8080"),
        );
        let req = HistoryRequest::new(
            Symbol::parse("BRK.B").expect("valid symbol"),
            Interval::OneDay,
            Period::SixMonths,
        );
        assert_eq!(
            adapter.chart_url(&req),
            "http://localhost:8080/v8/finance/chart/BRK.B?range=6mo&interval=1d&includePrePost=false"
        );
    }

    #[test]
    fn parses_closes_and_keeps_null_as_missing() {
        let body = r#"{"chart":{"result":[{"meta":{"currency":"USD"},
            "timestamp":[1704205800,1704292200,1704378600],
            "indicators":{"quote":[{"close":[185.64,null,181.91]}]}}],"error":null}}"#;

        let history = parse_chart_response(body, &request()).expect("valid payload");
        assert_eq!(history.currency.as_deref(), Some("USD"));
        let values: Vec<_> = history.closes.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![Some(185.64), None, Some(181.91)]);
    }

    #[test]
    fn short_close_column_pads_with_missing() {
        let body = r#"{"chart":{"result":[{"timestamp":[1704205800,1704292200],
            "indicators":{"quote":[{"close":[185.64]}]}}]}}"#;

        let history = parse_chart_response(body, &request()).expect("valid payload");
        assert_eq!(history.closes.len(), 2);
        assert_eq!(history.closes.missing_count(), 1);
        assert_eq!(history.currency, None);
    }

    #[test]
    fn drops_non_advancing_timestamps() {
        let body = r#"{"chart":{"result":[{"timestamp":[100,200,200,150,300],
            "indicators":{"quote":[{"close":[1.0,2.0,2.5,1.5,3.0]}]}}]}}"#;

        let history = parse_chart_response(body, &request()).expect("valid payload");
        let values: Vec<_> = history.closes.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert!(history.closes.check_ordering().is_ok());
    }

    #[test]
    fn chart_error_maps_to_unavailable() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found",
            "description":"No data found, symbol may be delisted"}}}"#;

        let error = parse_chart_response(body, &request()).expect_err("must fail");
        assert_eq!(error.kind(), crate::SourceErrorKind::Unavailable);
        assert!(error.message().contains("Not Found"));
    }

    #[test]
    fn malformed_body_is_internal() {
        let error = parse_chart_response("<html>", &request()).expect_err("must fail");
        assert_eq!(error.kind(), crate::SourceErrorKind::Internal);
    }

    #[test]
    fn empty_result_list_is_internal() {
        let error = parse_chart_response(r#"{"chart":{"result":[]}}"#, &request())
            .expect_err("must fail");
        assert_eq!(error.kind(), crate::SourceErrorKind::Internal);
    }

    #[test]
    fn fake_history_covers_period_at_daily_step() {
        let adapter = YahooAdapter::default();
        assert!(adapter.is_mock());
        let history = adapter.fetch_fake_history(&request()).expect("fake data");
        assert_eq!(history.closes.len(), 365);
        assert!(history.closes.check_ordering().is_ok());
        assert_eq!(history.closes.missing_count(), 0);
    }

    #[test]
    fn fake_history_is_deterministic_per_symbol() {
        let adapter = YahooAdapter::default();
        let first = adapter.fetch_fake_history(&request()).expect("fake data");
        let second = adapter.fetch_fake_history(&request()).expect("fake data");
        let values = |h: &PriceHistory| h.closes.iter().map(|s| s.value).collect::<Vec<_>>();
        assert_eq!(values(&first), values(&second));
    }
}
