//! `tutor models`

use anyhow::{Result, anyhow};
use tutor_llms::{Backend, OllamaBackend};
use tutor_runtime::RuntimeConfig;

use crate::output;

pub async fn handle(url: Option<String>) -> Result<()> {
    let mut config = RuntimeConfig::from_env();
    if let Some(url) = url {
        config = config.with_base_url(url);
    }
    let backend = OllamaBackend::new(config.ollama_config())?;

    let spinner = output::spinner(&format!("Fetching models from {}...", config.base_url));

    match backend.list_models().await {
        Ok(models) => {
            spinner.finish_and_clear();

            output::header(&format!("Models on {}", config.base_url));

            if models.is_empty() {
                output::dim("No models installed. Try `ollama pull gemma:2b`.");
                return Ok(());
            }

            let mut table = output::table();
            output::table_header(&mut table, "Model", "");

            let items: Vec<_> = models
                .iter()
                .map(|m| {
                    let marker = if *m == config.model { "default" } else { "" };
                    output::table_row(&mut table, m, marker);
                    (m.as_str(), marker)
                })
                .collect();

            output::table_print(&table, &items);

            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, "Failed to fetch models");
            Err(anyhow!("Failed to list models: {}", e))
        }
    }
}
