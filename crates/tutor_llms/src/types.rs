//! Wire types for the streaming generate endpoint

use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Stream of decoded response frames, in the order the backend sent them.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<GenerateChunk>> + Send>>;

/// Body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: GenerateOptions,
}

impl GenerateRequest {
    /// Build a streaming request.
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        temperature: f32,
        num_predict: u32,
    ) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: true,
            options: GenerateOptions {
                temperature,
                num_predict,
            },
        }
    }
}

/// Sampling options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub num_predict: u32,
}

/// One NDJSON line of the streaming response.
///
/// Every field is optional on the wire; lines without `response` carry
/// no text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateChunk {
    #[serde(default)]
    pub model: Option<String>,
    /// Text delta
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
    /// Error reported in-band by the backend
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub prompt_eval_count: Option<u64>,
    #[serde(default)]
    pub eval_count: Option<u64>,
}
