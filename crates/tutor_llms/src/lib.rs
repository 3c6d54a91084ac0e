//! Streaming client SDK for locally hosted inference backends.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              dyn Backend                      │
//! │   stream_generate(GenerateRequest)            │
//! │        -> ChunkStream (NDJSON, one per line)  │
//! └───────────────────────────────────────────────┘
//!                      │
//!                      ▼
//!              ┌───────────────┐
//!              │ OllamaBackend │  POST /api/generate
//!              └───────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use tutor_llms::{Backend, GenerateRequest, OllamaBackend, OllamaConfig};
//!
//! # async fn run() -> tutor_llms::Result<()> {
//! let backend = OllamaBackend::new(OllamaConfig::default())?;
//! let mut chunks = backend
//!     .stream_generate(GenerateRequest::new("gemma:2b", "Hello", 0.7, 256))
//!     .await?;
//! while let Some(chunk) = chunks.next().await {
//!     if let Some(text) = chunk?.response {
//!         print!("{text}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod backends;
pub mod decode;
pub mod error;
pub mod types;

pub use backend::Backend;
pub use backends::ollama::{OllamaBackend, OllamaConfig};
pub use error::{Error, Result};
pub use types::{ChunkStream, GenerateChunk, GenerateOptions, GenerateRequest};
