//! Ollama backend module
//!
//! Implements the Backend trait for a local Ollama server.
//! API docs: https://github.com/ollama/ollama/blob/main/docs/api.md#generate-a-completion

mod provider;
mod stream;
mod types;

pub use provider::OllamaBackend;
pub use types::{OllamaConfig, OllamaModel, OllamaTagsResponse};
