use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_error() {
        let err = CoreError::InvalidRequest("temperature out of range".to_string());
        assert_eq!(err.to_string(), "invalid request: temperature out of range");
    }
}
