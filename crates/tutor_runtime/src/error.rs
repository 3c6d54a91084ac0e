//! Runtime error types

use std::any::Any;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Backend error: {0}")]
    Backend(#[from] tutor_llms::Error),

    #[error("Request error: {0}")]
    Request(#[from] tutor_core::CoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A backend panicked while connecting or streaming
    #[error("Backend panicked: {0}")]
    Panic(String),
}

impl RuntimeError {
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        RuntimeError::Panic(message)
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
