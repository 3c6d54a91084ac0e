//! Tutor Observability - logging and tracing setup for the tutor workspace
//!
//! This crate wires `tracing` to its outputs: an optional console layer,
//! an optional append-only log file and optional OpenTelemetry export.
//!
//! # Quick Start
//!
//! ```no_run
//! use tutor_observability::{ObservabilityConfig, init};
//!
//! let config = ObservabilityConfig::new("tutor")
//!     .with_console(false)
//!     .with_log_file("english_teacher_app.log")
//!     .with_log_level("info");
//!
//! init(config)?;
//! tracing::info!("Service started");
//! # Ok::<(), tutor_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` or `SERVICE_NAME` - Service name
//! - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint
//! - `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter
//! - `TUTOR_LOG_FILE` - Log file path

pub mod config;
pub mod error;
pub mod spans;
pub mod telemetry;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use spans::{record_duration, record_error};
pub use telemetry::{init, shutdown};

// `generation_span!` is exported at the crate root via #[macro_export].
