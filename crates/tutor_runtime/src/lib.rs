pub mod cancel;
pub mod config;
pub mod error;
pub mod prompt;
pub mod relay;

pub use cancel::{CancelHandle, request_cancellation};
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use prompt::{build_prompt, compose};
pub use relay::{Generation, GenerationStream, RelayEngine, RetryPolicy};
