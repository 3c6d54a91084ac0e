//! Ollama-specific types

use std::time::Duration;

use serde::Deserialize;
use tutor_constant::defaults;

/// Configuration for the Ollama backend
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    /// Base URL (default: http://localhost:11434)
    pub base_url: String,
    /// Bound on opening the connection and receiving response headers
    pub request_timeout: Duration,
    /// Bound on the gap between two body reads; `None` waits forever
    pub idle_timeout: Option<Duration>,
}

impl OllamaConfig {
    /// Create new config pointing at the given server
    pub fn new(base_url: impl Into<String>) -> Self {
        let request_timeout = Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS);
        Self {
            base_url: normalize_base_url(base_url.into()),
            request_timeout,
            idle_timeout: Some(request_timeout),
        }
    }

    /// Set the connection timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set or disable the idle timeout between body reads
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::new(defaults::OLLAMA_BASE_URL)
    }
}

/// Accepts `host:port` as well as full URLs and drops trailing slashes.
fn normalize_base_url(url: String) -> String {
    let url = url.trim().trim_end_matches('/').to_string();
    if url.is_empty() || url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        format!("http://{}", url)
    }
}

/// Response of `GET /api/tags`
#[derive(Debug, Deserialize)]
pub struct OllamaTagsResponse {
    #[serde(default)]
    pub models: Vec<OllamaModel>,
}

/// One installed model
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaModel {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_at: Option<String>,
}
