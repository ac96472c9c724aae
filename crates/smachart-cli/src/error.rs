use smachart_core::{CoreError, RenderError, SourceError, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("data source error: {0}")]
    Source(#[from] SourceError),

    #[error("chart error: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid log filter '{value}': {reason}")]
    LogFilter { value: String, reason: String },
}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(error) => Self::Validation(error),
            CoreError::Source(error) => Self::Source(error),
            CoreError::Render(error) => Self::Render(error),
            CoreError::Serialization(error) => Self::Serialization(error),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::LogFilter { .. } => 2,
            Self::Source(_) => 3,
            Self::Serialization(_) => 4,
            Self::Render(_) => 7,
            Self::Io(_) => 10,
        }
    }
}
