//! Runtime configuration for the tutor relay

use std::time::Duration;

use tutor_constant::defaults;
use tutor_llms::OllamaConfig;

use crate::error::{Result, RuntimeError};
use crate::relay::RetryPolicy;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Inference backend base URL
    pub base_url: String,
    /// Model to request
    pub model: String,
    /// Sampling temperature in [0.0, 1.0]
    pub temperature: f32,
    /// Maximum tokens for one response
    pub max_tokens: u32,
    /// Bound on each connection attempt
    pub request_timeout: Duration,
    /// Bound on silence between body reads (None = wait forever)
    pub idle_timeout: Option<Duration>,
    /// Connection attempts per generation
    pub max_retries: u32,
    /// Pause between attempts
    pub retry_backoff: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        let request_timeout = Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS);
        Self {
            base_url: defaults::OLLAMA_BASE_URL.to_string(),
            model: defaults::MODEL.to_string(),
            temperature: defaults::TEMPERATURE,
            max_tokens: defaults::MAX_TOKENS,
            request_timeout,
            idle_timeout: Some(request_timeout),
            max_retries: defaults::MAX_RETRIES,
            retry_backoff: Duration::from_secs(defaults::RETRY_BACKOFF_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Backend connection settings derived from this config.
    pub fn ollama_config(&self) -> OllamaConfig {
        OllamaConfig::new(&self.base_url)
            .with_request_timeout(self.request_timeout)
            .with_idle_timeout(self.idle_timeout)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_backoff)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(RuntimeError::ConfigError("base URL must not be empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(RuntimeError::ConfigError("model must not be empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(RuntimeError::ConfigError(format!(
                "temperature {} is outside [0.0, 1.0]",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(RuntimeError::ConfigError("max tokens must be greater than zero".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(RuntimeError::ConfigError(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if self.idle_timeout.is_some_and(|idle| idle.is_zero()) {
            return Err(RuntimeError::ConfigError(
                "idle timeout must be greater than zero; use None to disable it".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(RuntimeError::ConfigError("max retries must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(url) = std::env::var("TUTOR_OLLAMA_URL").or_else(|_| std::env::var("OLLAMA_HOST")) {
            config.base_url = url;
        }

        if let Ok(model) = std::env::var("TUTOR_MODEL") {
            config.model = model;
        }

        if let Ok(temperature) = std::env::var("TUTOR_TEMPERATURE") {
            if let Ok(val) = temperature.parse::<f32>() {
                config.temperature = val;
            }
        }

        if let Ok(max_tokens) = std::env::var("TUTOR_MAX_TOKENS") {
            if let Ok(val) = max_tokens.parse::<u32>() {
                config.max_tokens = val;
            }
        }

        if let Ok(timeout) = std::env::var("TUTOR_REQUEST_TIMEOUT_SECS") {
            if let Ok(val) = timeout.parse::<u64>() {
                config.request_timeout = Duration::from_secs(val);
                config.idle_timeout = config.idle_timeout.map(|_| config.request_timeout);
            }
        }

        // 0 disables the idle timeout
        if let Ok(idle) = std::env::var("TUTOR_IDLE_TIMEOUT_SECS") {
            if let Ok(val) = idle.parse::<u64>() {
                config.idle_timeout = (val > 0).then(|| Duration::from_secs(val));
            }
        }

        if let Ok(retries) = std::env::var("TUTOR_MAX_RETRIES") {
            if let Ok(val) = retries.parse::<u32>() {
                config.max_retries = val;
            }
        }

        if let Ok(backoff) = std::env::var("TUTOR_RETRY_BACKOFF_SECS") {
            if let Ok(val) = backoff.parse::<u64>() {
                config.retry_backoff = Duration::from_secs(val);
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_config_new() {
        let config = RuntimeConfig::new();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.model, "gemma:2b");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.request_timeout, Duration::from_secs(45));
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_backoff, Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_runtime_config_builder() {
        let config = RuntimeConfig::new()
            .with_base_url("http://gpu-box:11434")
            .with_model("llama3.2")
            .with_temperature(0.1)
            .with_max_tokens(512)
            .with_request_timeout(Duration::from_secs(10))
            .with_idle_timeout(None)
            .with_max_retries(5)
            .with_retry_backoff(Duration::from_millis(500));

        assert_eq!(config.base_url, "http://gpu-box:11434");
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.idle_timeout, None);

        let policy = config.retry_policy();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.retry_backoff, Duration::from_millis(500));

        let ollama = config.ollama_config();
        assert_eq!(ollama.base_url, "http://gpu-box:11434");
        assert_eq!(ollama.request_timeout, Duration::from_secs(10));
        assert_eq!(ollama.idle_timeout, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(RuntimeConfig::new().with_max_retries(0).validate().is_err());
        assert!(RuntimeConfig::new().with_temperature(1.2).validate().is_err());
        assert!(RuntimeConfig::new().with_max_tokens(0).validate().is_err());
        assert!(RuntimeConfig::new().with_model("").validate().is_err());

        let err = RuntimeConfig::new().with_base_url(" ").validate().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: base URL must not be empty");
    }

    #[test]
    fn test_validate_rejects_zero_timeouts() {
        let err = RuntimeConfig::new()
            .with_request_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: request timeout must be greater than zero"
        );

        let zero_idle = RuntimeConfig::new().with_idle_timeout(Some(Duration::ZERO));
        assert!(zero_idle.validate().is_err());

        let no_idle = RuntimeConfig::new().with_idle_timeout(None);
        assert!(no_idle.validate().is_ok());
    }
}
