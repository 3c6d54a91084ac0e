//! Streaming relay: prompt in, cumulative text out.
//!
//! [`RelayEngine::generate`] returns a lazy stream whose items are the whole
//! reply received so far (not deltas), so a front end can replace its
//! rendering with every item. Failures never surface as errors: each ends
//! the stream with a readable notice instead, including a panic raised by
//! the backend while connecting or streaming.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use futures::{FutureExt, Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tutor_constant::{defaults, persona};
use tutor_core::GenerationRequest;
use tutor_llms::{Backend, GenerateChunk, GenerateRequest, OllamaBackend};
use tutor_observability::{generation_span, record_duration, record_error};

use crate::cancel::{ActiveGuard, ActiveSlot, CancelHandle};
use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::prompt;

pub const CANCELLED_NOTICE: &str = "⏹️ Generation stopped by user.";
pub const RETRIES_EXHAUSTED_NOTICE: &str =
    "❌ All retries failed. Please check your connection to Ollama and try again later.";

const RETRY_PREFIX: &str = "⛔ Connection Error: ";
const SYSTEM_ERROR_PREFIX: &str = "❌ An unexpected system error occurred: ";

pub fn retry_notice(error: &impl std::fmt::Display) -> String {
    format!("{RETRY_PREFIX}{error}\nRetrying...")
}

pub fn system_error_notice(error: &impl std::fmt::Display) -> String {
    format!("{SYSTEM_ERROR_PREFIX}{error}")
}

/// Whether a yielded item is a status notice rather than reply text.
pub fn is_notice(text: &str) -> bool {
    text == CANCELLED_NOTICE
        || text == RETRIES_EXHAUSTED_NOTICE
        || text.starts_with(RETRY_PREFIX)
        || text.starts_with(SYSTEM_ERROR_PREFIX)
}

/// Cumulative reply texts and notices, in order.
pub type GenerationStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// How often and how patiently to reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Connection attempts per generation, at least 1
    pub max_retries: u32,
    /// Pause between two attempts
    pub retry_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_backoff: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            retry_backoff,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            defaults::MAX_RETRIES,
            Duration::from_secs(defaults::RETRY_BACKOFF_SECS),
        )
    }
}

/// A started generation: its cancel handle plus the output stream.
///
/// `Generation` is itself a `Stream`, so callers that do not need the
/// handle can consume it directly.
pub struct Generation {
    handle: CancelHandle,
    stream: GenerationStream,
}

impl Generation {
    pub fn handle(&self) -> &CancelHandle {
        &self.handle
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    pub fn into_parts(self) -> (CancelHandle, GenerationStream) {
        (self.handle, self.stream)
    }
}

impl Stream for Generation {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.stream.poll_next_unpin(cx)
    }
}

/// Relays generations to a backend, one stream per request.
pub struct RelayEngine {
    backend: Arc<dyn Backend>,
    policy: RetryPolicy,
    persona: Arc<str>,
    active: ActiveSlot,
}

impl RelayEngine {
    pub fn new(backend: Arc<dyn Backend>, policy: RetryPolicy) -> Self {
        Self {
            backend,
            policy,
            persona: Arc::from(persona::ENGLISH_TEACHER),
            active: ActiveSlot::default(),
        }
    }

    /// Build an engine talking to Ollama as described by `config`.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        config.validate()?;
        let backend = OllamaBackend::new(config.ollama_config()).map_err(RuntimeError::from)?;
        Ok(Self::new(Arc::new(backend), config.retry_policy()))
    }

    /// Replace the persona preamble.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Arc::from(persona.into());
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Whether a generation started by this engine is still running.
    pub fn has_active_generation(&self) -> bool {
        self.active.is_active()
    }

    /// Start a generation. Nothing is sent until the stream is polled.
    pub fn generate(&self, request: GenerationRequest) -> Generation {
        let handle = CancelHandle::new();
        let guard = self.active.install(&handle);

        let stream = relay_stream(RelayJob {
            backend: Arc::clone(&self.backend),
            policy: self.policy,
            persona: Arc::clone(&self.persona),
            request,
            token: handle.token().clone(),
            generation_id: handle.id().to_string(),
            guard,
        });

        Generation { handle, stream }
    }

    /// Cancel the most recently started generation that is still running.
    /// Does nothing when none is.
    pub fn request_cancellation(&self) {
        if self.active.cancel() {
            info!("Stop requested. Halting generation.");
        } else {
            tracing::debug!("Stop requested with no active generation");
        }
    }
}

/// Everything one generation owns.
struct RelayJob {
    backend: Arc<dyn Backend>,
    policy: RetryPolicy,
    persona: Arc<str>,
    request: GenerationRequest,
    token: CancellationToken,
    generation_id: String,
    guard: ActiveGuard,
}

#[derive(Debug, Default)]
struct GenerationState {
    accumulated: String,
    attempt: u32,
}

impl GenerationState {
    fn begin_attempt(&mut self) {
        self.attempt += 1;
        self.accumulated.clear();
    }
}

/// Run `fut` unless `token` fires first; `None` means cancelled.
async fn until_cancelled<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        output = fut => Some(output),
    }
}

fn relay_stream(job: RelayJob) -> GenerationStream {
    let stream = async_stream::stream! {
        let RelayJob { backend, policy, persona, request, token, generation_id, guard } = job;
        let _guard = guard;
        let span = generation_span!(generation_id, request.model());

        if let Err(e) = request.validate() {
            let err = RuntimeError::from(e);
            record_error(&span, &err);
            yield system_error_notice(&err);
            return;
        }

        let full_prompt = prompt::compose(&persona, request.transcript(), request.message());
        let payload = GenerateRequest::new(
            request.model(),
            full_prompt,
            request.temperature(),
            request.max_tokens(),
        );
        info!(
            parent: &span,
            backend = backend.backend_id(),
            temperature = request.temperature(),
            max_tokens = request.max_tokens(),
            history_turns = request.transcript().len(),
            "Sending request to model"
        );

        let started = Instant::now();
        let mut state = GenerationState::default();

        while state.attempt < policy.max_retries {
            state.begin_attempt();

            let connect = AssertUnwindSafe(backend.stream_generate(payload.clone())).catch_unwind();
            let Some(opened) = until_cancelled(&token, connect).await else {
                info!(parent: &span, attempt = state.attempt, "Generation stopped while connecting");
                yield CANCELLED_NOTICE.to_string();
                return;
            };
            let opened = match opened {
                Ok(opened) => opened,
                Err(panic) => {
                    let err = RuntimeError::from_panic(panic);
                    record_error(&span, &err);
                    yield system_error_notice(&err);
                    return;
                }
            };

            let failure = match opened {
                Ok(mut chunks) => loop {
                    let read = AssertUnwindSafe(chunks.next()).catch_unwind();
                    let Some(next) = until_cancelled(&token, read).await else {
                        // Dropping the stream closes the connection.
                        drop(chunks);
                        info!(
                            parent: &span,
                            received_chars = state.accumulated.len(),
                            "Generation stopped by user"
                        );
                        yield CANCELLED_NOTICE.to_string();
                        return;
                    };

                    let next = match next {
                        Ok(next) => next,
                        Err(panic) => {
                            drop(chunks);
                            let err = RuntimeError::from_panic(panic);
                            record_error(&span, &err);
                            yield system_error_notice(&err);
                            return;
                        }
                    };

                    match next {
                        Some(Ok(chunk)) => {
                            if let Some(text) = apply_chunk(&mut state, chunk, &span) {
                                yield text;
                            }
                        }
                        Some(Err(e)) => break e,
                        None => {
                            record_duration(&span, "duration_ms", started.elapsed());
                            info!(
                                parent: &span,
                                attempt = state.attempt,
                                response_chars = state.accumulated.len(),
                                "Response successfully received"
                            );
                            return;
                        }
                    }
                },
                Err(e) => e,
            };

            if !failure.is_transient() {
                let err = RuntimeError::from(failure);
                record_error(&span, &err);
                yield system_error_notice(&err);
                return;
            }

            error!(parent: &span, attempt = state.attempt, error = %failure, "Connection error");

            if state.attempt < policy.max_retries {
                yield retry_notice(&failure);
                if until_cancelled(&token, tokio::time::sleep(policy.retry_backoff)).await.is_none() {
                    info!(parent: &span, "Generation stopped during retry backoff");
                    yield CANCELLED_NOTICE.to_string();
                    return;
                }
            }
        }

        record_duration(&span, "duration_ms", started.elapsed());
        error!(parent: &span, attempts = state.attempt, "All retries failed");
        yield RETRIES_EXHAUSTED_NOTICE.to_string();
    };

    Box::pin(stream)
}

/// Fold one frame into the state; returns the new cumulative text when the
/// frame carried any.
fn apply_chunk(state: &mut GenerationState, chunk: GenerateChunk, span: &tracing::Span) -> Option<String> {
    if let Some(message) = chunk.error {
        warn!(parent: span, backend_error = %message, "Backend reported an error in the stream");
    }

    let delta = chunk.response?;
    state.accumulated.push_str(&delta);
    Some(state.accumulated.clone())
}
