//! Command dispatch.

pub mod ask;
pub mod chat;
pub mod config;
pub mod models;

use anyhow::{Context, Result};
use futures::StreamExt;
use tutor_core::GenerationRequest;
use tutor_runtime::relay::is_notice;
use tutor_runtime::{RelayEngine, RuntimeConfig};

use crate::cli::{Cli, Command, GenerationArgs};
use crate::output;
use crate::render::StreamPrinter;

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Chat { args } => chat::handle(args).await,
        Command::Ask { message, args } => ask::handle(message, args).await,
        Command::Models { url } => models::handle(url).await,
        Command::Config => config::handle().await,
    }
}

/// Environment configuration with command-line overrides applied.
pub(crate) fn runtime_config(args: &GenerationArgs) -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::from_env();
    if let Some(url) = &args.url {
        config = config.with_base_url(url);
    }
    if let Some(model) = &args.model {
        config = config.with_model(model);
    }
    if let Some(temperature) = args.temperature {
        config = config.with_temperature(temperature);
    }
    if let Some(max_tokens) = args.max_tokens {
        config = config.with_max_tokens(max_tokens);
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

pub(crate) fn request_for(
    config: &RuntimeConfig,
    message: &str,
    transcript: tutor_core::Transcript,
) -> GenerationRequest {
    GenerationRequest::new(message, transcript, &config.model)
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens)
}

/// How one relayed generation ended.
pub(crate) struct Outcome {
    /// Reply text received, possibly partial
    pub reply: String,
    /// Final notice, if the generation ended with one
    pub notice: Option<String>,
}

/// Drive one generation to completion, echoing deltas when `echo` is set.
/// Ctrl-C stops the generation instead of the process.
pub(crate) async fn relay(engine: &RelayEngine, request: GenerationRequest, echo: bool) -> Outcome {
    let mut generation = engine.generate(request);
    let mut printer = StreamPrinter::new();
    let mut last = None;

    loop {
        tokio::select! {
            item = generation.next() => match item {
                Some(text) => {
                    let delta = printer.update(&text);
                    if echo {
                        output::write_raw(&delta);
                    }
                    last = Some(text);
                }
                None => break,
            },
            Ok(()) = tokio::signal::ctrl_c() => {
                tracing::debug!("Ctrl-C received during generation");
                engine.request_cancellation();
            }
        }
    }

    Outcome {
        reply: printer.reply().to_string(),
        notice: last.filter(|text| is_notice(text)),
    }
}
