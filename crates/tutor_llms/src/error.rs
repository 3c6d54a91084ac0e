//! Error types for backend calls

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Connection refused, DNS failure, reset, or any other transport fault
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Reading the streaming body failed after the connection was open
    #[error("stream error: {0}")]
    Stream(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid backend configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn stream_error(message: impl Into<String>) -> Self {
        Error::Stream(message.into())
    }

    pub fn status_error(status: u16, body: impl Into<String>) -> Self {
        Error::Status {
            status,
            body: body.into(),
        }
    }

    /// Connection-level failures worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::Status { .. } | Error::Timeout(_) | Error::Stream(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
