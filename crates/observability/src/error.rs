//! Error types for observability crate

use thiserror::Error;

/// Errors that can occur during observability initialization
#[derive(Error, Debug)]
pub enum ObservabilityError {
    /// Failed to initialize the subscriber or exporter
    #[error("Failed to initialize observability: {0}")]
    InitFailed(String),

    /// The log file could not be opened
    #[error("Failed to open log file: {0}")]
    LogFile(#[from] std::io::Error),
}
