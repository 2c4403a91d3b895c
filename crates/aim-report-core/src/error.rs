//! Error types for aim-report-core

use thiserror::Error;

/// Result type alias using [`ReportError`]
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur in aim-report-core
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required source column could not be located; the batch is refused
    #[error("Missing required {0} column in CSV input")]
    MissingRequiredField(String),

    /// A date value could not be parsed (per-row, non-fatal)
    #[error("Unparseable date: {0:?}")]
    UnparseableDate(String),

    /// An extraction rule failed to compile
    #[error("Invalid extraction pattern {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReportError {
    /// Create a new configuration error with a message
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ReportError::InvalidConfig(msg.into())
    }
}
