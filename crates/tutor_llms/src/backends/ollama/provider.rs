//! Ollama backend implementation

use async_trait::async_trait;
use reqwest::Client;
use tutor_constant::defaults::{GENERATE_PATH, TAGS_PATH};

use super::stream::create_stream;
use super::types::{OllamaConfig, OllamaTagsResponse};
use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::{ChunkStream, GenerateRequest};

/// Ollama backend
pub struct OllamaBackend {
    config: OllamaConfig,
    client: Client,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(config: OllamaConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(Error::InvalidConfig("base URL must not be empty".to_string()));
        }

        let client = Client::builder()
            .connect_timeout(config.request_timeout)
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

#[async_trait]
impl Backend for OllamaBackend {
    fn backend_id(&self) -> &str {
        "ollama"
    }

    async fn stream_generate(&self, request: GenerateRequest) -> Result<ChunkStream> {
        let url = self.url(GENERATE_PATH);
        tracing::debug!(
            url = %url,
            model = %request.model,
            prompt_chars = request.prompt.len(),
            "Opening generate stream"
        );

        let send = self.client.post(&url).json(&request).send();
        let response = tokio::time::timeout(self.config.request_timeout, send)
            .await
            .map_err(|_| Error::Timeout(self.config.request_timeout))??;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::status_error(status.as_u16(), error_text));
        }

        Ok(create_stream(response, self.config.idle_timeout))
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let url = self.url(TAGS_PATH);

        let response = self
            .client
            .get(&url)
            .timeout(self.config.request_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::status_error(status.as_u16(), error_text));
        }

        let body = response.text().await?;
        let tags: OllamaTagsResponse = serde_json::from_str(&body)?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}
