//! Reference defaults for the inference backend and the relay.
//!
//! Everything here is a default only; the runtime config and CLI flags
//! override each value.

/// Base URL of the local Ollama server
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";
/// Streaming text generation endpoint
pub const GENERATE_PATH: &str = "/api/generate";
/// Installed model listing endpoint
pub const TAGS_PATH: &str = "/api/tags";

pub const MODEL: &str = "gemma:2b";
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 1024;

/// Lower bound offered by front ends for the max-tokens setting
pub const MIN_MAX_TOKENS: u32 = 128;
/// Upper bound offered by front ends for the max-tokens setting
pub const MAX_MAX_TOKENS: u32 = 4096;

/// Per connection attempt, not per stream
pub const REQUEST_TIMEOUT_SECS: u64 = 45;
pub const MAX_RETRIES: u32 = 3;
pub const RETRY_BACKOFF_SECS: u64 = 2;
