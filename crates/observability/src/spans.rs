//! Span helpers

/// Create a span for one relay generation
///
/// Declares the `error`, `error.message` and `duration_ms` fields so that
/// [`record_error`] and [`record_duration`] can fill them in later.
///
/// # Example
///
/// ```rust
/// use tutor_observability::generation_span;
///
/// let span = generation_span!("5b1f0c4e", "gemma:2b");
/// tracing::info!(parent: &span, "Sending request to model");
/// ```
#[macro_export]
macro_rules! generation_span {
    ($generation_id:expr, $model:expr) => {
        tracing::info_span!(
            "relay.generation",
            generation.id = %$generation_id,
            model = %$model,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        )
    };
}

/// Record an error on the given span and log it
///
/// # Example
///
/// ```rust
/// use tutor_observability::{generation_span, record_error};
///
/// let span = generation_span!("id", "gemma:2b");
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
/// record_error(&span, &err);
/// ```
pub fn record_error<E: std::error::Error>(span: &tracing::Span, error: &E) {
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(parent: span, error = %error, "Operation failed");
}

/// Record a duration in milliseconds on the given span
///
/// # Example
///
/// ```rust
/// use std::time::Instant;
/// use tutor_observability::{generation_span, record_duration};
///
/// let span = generation_span!("id", "gemma:2b");
/// let start = Instant::now();
/// record_duration(&span, "duration_ms", start.elapsed());
/// ```
pub fn record_duration(span: &tracing::Span, key: &str, duration: std::time::Duration) {
    span.record(key, duration.as_millis() as u64);
}
