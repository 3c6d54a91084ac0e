//! `tutor ask` one-shot question.

use anyhow::Result;
use serde::Serialize;
use tutor_core::Transcript;
use tutor_runtime::RelayEngine;

use crate::cli::GenerationArgs;
use crate::commands::{relay, request_for, runtime_config};
use crate::output;

#[derive(Serialize)]
struct AskResult<'a> {
    model: &'a str,
    message: &'a str,
    reply: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'a str>,
}

pub async fn handle(message: String, args: GenerationArgs) -> Result<()> {
    let config = runtime_config(&args)?;
    let engine = RelayEngine::from_config(&config)?;
    let request = request_for(&config, &message, Transcript::new());

    let echo = !output::is_json();
    let outcome = relay(&engine, request, echo).await;

    if echo {
        println!();
    } else {
        output::data(
            "reply",
            &AskResult {
                model: &config.model,
                message: &message,
                reply: &outcome.reply,
                notice: outcome.notice.as_deref(),
            },
        );
    }

    Ok(())
}
