//! Error types for analysis operations

use thiserror::Error;

/// Analysis engine errors
///
/// Sparse input never produces an error: short histories, empty news and
/// unknown ratios all degrade to neutral values. Errors are reserved for
/// malformed calls, bad configuration and data-source failures.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The indicator pipeline was given an empty price series
    #[error("Insufficient data: {context}")]
    InsufficientData { context: String },

    /// Configuration failed validation
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// A data source could not produce the input for a symbol
    #[error("Snapshot unavailable for {symbol}: {reason}")]
    Snapshot { symbol: String, reason: String },

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A background analysis task did not complete
    #[error("Analysis task failed: {0}")]
    TaskFailed(String),
}

impl AnalysisError {
    pub(crate) fn insufficient(context: impl Into<String>) -> Self {
        Self::InsufficientData {
            context: context.into(),
        }
    }

    pub(crate) fn snapshot(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Snapshot {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}

impl From<tokio::task::JoinError> for AnalysisError {
    fn from(err: tokio::task::JoinError) -> Self {
        AnalysisError::TaskFailed(err.to_string())
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
