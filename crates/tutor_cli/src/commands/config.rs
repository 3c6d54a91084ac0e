//! `tutor config` shows the effective configuration.

use anyhow::Result;
use serde::Serialize;
use tutor_runtime::RuntimeConfig;

use crate::output;

#[derive(Serialize)]
struct ConfigView {
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    request_timeout_secs: u64,
    idle_timeout_secs: Option<u64>,
    max_retries: u32,
    retry_backoff_secs: u64,
}

impl From<&RuntimeConfig> for ConfigView {
    fn from(config: &RuntimeConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            request_timeout_secs: config.request_timeout.as_secs(),
            idle_timeout_secs: config.idle_timeout.map(|d| d.as_secs()),
            max_retries: config.max_retries,
            retry_backoff_secs: config.retry_backoff.as_secs(),
        }
    }
}

pub async fn handle() -> Result<()> {
    let config = RuntimeConfig::from_env();
    let view = ConfigView::from(&config);

    if output::is_json() {
        output::data("config", &view);
    } else {
        output::header("Effective configuration");
        output::kv("base_url", &view.base_url);
        output::kv("model", &view.model);
        output::kv("temperature", &view.temperature.to_string());
        output::kv("max_tokens", &view.max_tokens.to_string());
        output::kv("request_timeout", &format!("{}s", view.request_timeout_secs));
        let idle = view
            .idle_timeout_secs
            .map(|s| format!("{s}s"))
            .unwrap_or_else(|| "disabled".to_string());
        output::kv("idle_timeout", &idle);
        output::kv("max_retries", &view.max_retries.to_string());
        output::kv("retry_backoff", &format!("{}s", view.retry_backoff_secs));
    }

    if let Err(e) = config.validate() {
        output::warning(&e.to_string());
    }

    Ok(())
}
