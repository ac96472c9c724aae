//! Data source trait and request/error types.
//!
//! A data source turns a [`HistoryRequest`] into a [`PriceHistory`]. It may be
//! slow, may fail, and may return fewer samples than the period implies; the
//! caller treats it as an external collaborator.
//!
//! ```rust,ignore
//! use smachart_core::{DataSource, HistoryRequest, Interval, Period, Symbol, YahooAdapter};
//!
//! async fn closes(adapter: &YahooAdapter) -> Result<usize, smachart_core::SourceError> {
//!     let request = HistoryRequest::new(Symbol::parse("AAPL")?, Interval::OneDay, Period::OneYear);
//!     let history = adapter.history(request).await?;
//!     Ok(history.closes.len())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{Interval, Period, PriceHistory, ProviderId, Symbol, ValidationError};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    Internal,
}

/// Structured source error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<ValidationError> for SourceError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

/// Request payload for a closing-price history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: Symbol,
    pub interval: Interval,
    pub period: Period,
}

impl HistoryRequest {
    pub fn new(symbol: Symbol, interval: Interval, period: Period) -> Self {
        Self {
            symbol,
            interval,
            period,
        }
    }

    /// One year of daily closes, the default chart input.
    pub fn daily_year(symbol: Symbol) -> Self {
        Self::new(symbol, Interval::OneDay, Period::OneYear)
    }
}

/// Source adapter contract.
///
/// Implementations must be `Send + Sync`; methods return boxed futures so the
/// trait stays object-safe.
pub trait DataSource: Send + Sync {
    /// Returns the provider identifier.
    fn id(&self) -> ProviderId;

    /// Fetches the closing-price history for the requested symbol and period.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the provider is unavailable, rate limited,
    /// or returns a payload that cannot be normalized.
    fn history<'a>(
        &'a self,
        req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, SourceError>> + Send + 'a>>;
}
