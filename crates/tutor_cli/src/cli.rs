//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};
use tutor_constant::defaults;

/// Practice English with a friendly tutor running on a local Ollama model
#[derive(Parser)]
#[command(name = "tutor", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

/// Overrides applied on top of the environment configuration.
#[derive(Args, Clone, Debug, Default)]
pub struct GenerationArgs {
    /// Model to use (e.g. gemma:2b). Uses TUTOR_MODEL env if not set.
    #[arg(long)]
    pub model: Option<String>,
    /// Sampling temperature between 0.0 and 1.0
    #[arg(long)]
    pub temperature: Option<f32>,
    /// Maximum tokens for one reply (128-4096)
    #[arg(
        long,
        value_parser = clap::value_parser!(u32)
            .range(i64::from(defaults::MIN_MAX_TOKENS)..=i64::from(defaults::MAX_MAX_TOKENS))
    )]
    pub max_tokens: Option<u32>,
    /// Ollama base URL. Uses TUTOR_OLLAMA_URL or OLLAMA_HOST if not set.
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start an interactive conversation
    Chat {
        #[command(flatten)]
        args: GenerationArgs,
    },
    /// Ask a single question and print the reply
    Ask {
        /// Message to send
        message: String,
        #[command(flatten)]
        args: GenerationArgs,
    },
    /// List models available on the Ollama server
    Models {
        /// Ollama base URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Show the effective configuration
    Config,
}
