//! Backend trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChunkStream, GenerateRequest};

/// An inference server reachable over a streaming HTTP endpoint.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Short identifier used in logs (e.g. `"ollama"`).
    fn backend_id(&self) -> &str;

    /// Open a streaming generation.
    ///
    /// Resolves once the backend has accepted the request; the returned
    /// stream yields decoded frames until the body ends. Dropping the
    /// stream closes the connection.
    async fn stream_generate(&self, request: GenerateRequest) -> Result<ChunkStream>;

    /// Names of the models the backend can serve.
    async fn list_models(&self) -> Result<Vec<String>>;
}
