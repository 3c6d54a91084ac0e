use serde::{Deserialize, Serialize};
use tutor_constant::defaults;

use crate::error::{CoreError, Result};
use crate::turn::Transcript;

/// One user message plus the context needed to answer it.
///
/// Configure with the `with_*` builders, then hand it to the relay. After
/// construction the fields are only readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    message: String,
    transcript: Transcript,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(
        message: impl Into<String>,
        transcript: Transcript,
        model: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            transcript,
            model: model.into(),
            temperature: defaults::TEMPERATURE,
            max_tokens: defaults::MAX_TOKENS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Check the sampling parameters and model name.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(CoreError::InvalidRequest("model must not be empty".to_string()));
        }
        if !self.temperature.is_finite() || !(0.0..=1.0).contains(&self.temperature) {
            return Err(CoreError::InvalidRequest(format!(
                "temperature {} is outside [0.0, 1.0]",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(CoreError::InvalidRequest(
                "max_tokens must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::ConversationTurn;

    #[test]
    fn test_request_builder() {
        let transcript: Transcript = vec![ConversationTurn::user("Hi")].into_iter().collect();
        let request = GenerationRequest::new("How are you?", transcript, "gemma:2b")
            .with_temperature(0.2)
            .with_max_tokens(256);

        assert_eq!(request.message(), "How are you?");
        assert_eq!(request.transcript().len(), 1);
        assert_eq!(request.model(), "gemma:2b");
        assert_eq!(request.temperature(), 0.2);
        assert_eq!(request.max_tokens(), 256);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_temperature_bounds_inclusive() {
        let low = GenerationRequest::new("x", Transcript::new(), "m").with_temperature(0.0);
        let high = GenerationRequest::new("x", Transcript::new(), "m").with_temperature(1.0);
        assert!(low.validate().is_ok());
        assert!(high.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_temperature() {
        let request = GenerationRequest::new("x", Transcript::new(), "m").with_temperature(1.5);
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("temperature"));

        let nan = GenerationRequest::new("x", Transcript::new(), "m").with_temperature(f32::NAN);
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_max_tokens() {
        let request = GenerationRequest::new("x", Transcript::new(), "m").with_max_tokens(0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_model() {
        let request = GenerationRequest::new("x", Transcript::new(), "  ");
        assert!(matches!(request.validate(), Err(CoreError::InvalidRequest(_))));
    }
}
