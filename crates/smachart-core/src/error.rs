use thiserror::Error;

/// Validation and argument errors exposed by `smachart-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid interval '{value}', expected one of 1m, 5m, 15m, 1h, 1d")]
    InvalidInterval { value: String },
    #[error("invalid period '{value}', expected one of 1mo, 3mo, 6mo, 1y, 2y, 5y, max")]
    InvalidPeriod { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("rolling window must be at least 1, got {window}")]
    InvalidWindow { window: usize },
    #[error("series timestamps must be strictly increasing (violated at index {index})")]
    UnorderedSeries { index: usize },
}

impl ValidationError {
    /// True for the invalid-argument conditions raised by the rolling mean.
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidWindow { .. } | Self::UnorderedSeries { .. }
        )
    }
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] crate::SourceError),

    #[error(transparent)]
    Render(#[from] crate::chart::RenderError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
