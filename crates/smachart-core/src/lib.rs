//! # smachart core
//!
//! Price history retrieval, trailing-window moving average and chart
//! rendering for the `smachart` CLI.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`rolling`] | Rolling mean over an ordered series |
//! | [`domain`] | Symbol, interval, period, sample and series types |
//! | [`data_source`] | Data source trait, request and error types |
//! | [`adapters`] | Yahoo Finance chart adapter |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`chart`] | Line chart rasterizer |
//! | [`config`] | Environment-driven provider settings |
//! | [`error`] | Core error types |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Data Source     │────▶│ HTTP Client      │
//! │ (YahooAdapter)  │     │ (reqwest)        │
//! └────────┬────────┘     └──────────────────┘
//!          │ PriceHistory
//!          ▼
//! ┌─────────────────┐
//! │ RollingMean     │
//! └────────┬────────┘
//!          │ RollingResult
//!          ▼
//! ┌─────────────────┐
//! │ chart::render   │──▶ chart.png
//! └─────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use smachart_core::{chart, rolling, ChartSpec, DataSource, HistoryRequest, Symbol, YahooAdapter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let symbol = Symbol::parse("AAPL")?;
//!     let adapter = YahooAdapter::from_config(Default::default());
//!     let history = adapter.history(HistoryRequest::daily_year(symbol.clone())).await?;
//!
//!     let result = rolling::compute(&history.closes, 50)?;
//!     let spec = ChartSpec::for_symbol(&symbol, 50, history.interval);
//!     chart::render(&result, &spec, "chart.png".as_ref())?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod chart;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod rolling;
pub mod source;

pub use adapters::YahooAdapter;

pub use chart::{ChartSpec, RenderError};

pub use config::YahooConfig;

pub use data_source::{DataSource, HistoryRequest, SourceError, SourceErrorKind};

pub use domain::{Interval, Period, PriceHistory, Sample, Series, Symbol, UtcDateTime};

pub use error::{CoreError, ValidationError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use rolling::{RollingMeanSeries, RollingPoint, RollingResult};

pub use source::ProviderId;
