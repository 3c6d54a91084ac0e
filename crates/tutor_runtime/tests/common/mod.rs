//! Scripted in-memory backend for relay tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;
use tutor_llms::{Backend, ChunkStream, Error, GenerateChunk, GenerateRequest};

/// One frame of a scripted response body.
pub enum Frame {
    Text(&'static str),
    Raw(GenerateChunk),
    Fail(Error),
    /// Never produce another frame.
    Hang,
    Panic(&'static str),
}

/// What one connection attempt does.
pub enum Attempt {
    Refuse(Error),
    Stream(Vec<Frame>),
    Panic(&'static str),
}

/// Counts streams that have been opened and not yet dropped.
struct OpenConnection(Arc<AtomicUsize>);

impl OpenConnection {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for OpenConnection {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Plays back one `Attempt` per `stream_generate` call; refuses with a 503
/// once the script is exhausted.
#[derive(Default)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Attempt>>,
    attempts: Mutex<Vec<Instant>>,
    requests: Mutex<Vec<GenerateRequest>>,
    open: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    pub fn new(script: Vec<Attempt>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        })
    }

    pub fn always_refusing() -> Arc<Self> {
        Self::new(Vec::new())
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    pub fn attempt_times(&self) -> Vec<Instant> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn open_connections(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    fn backend_id(&self) -> &str {
        "scripted"
    }

    async fn stream_generate(&self, request: GenerateRequest) -> tutor_llms::Result<ChunkStream> {
        self.attempts.lock().unwrap().push(Instant::now());
        self.requests.lock().unwrap().push(request);

        let next = self.script.lock().unwrap().pop_front();
        let frames = match next {
            Some(Attempt::Stream(frames)) => frames,
            Some(Attempt::Refuse(e)) => return Err(e),
            Some(Attempt::Panic(message)) => panic!("{message}"),
            None => return Err(Error::status_error(503, "service unavailable")),
        };

        let connection = OpenConnection::new(Arc::clone(&self.open));
        let stream = async_stream::stream! {
            let _connection = connection;
            for frame in frames {
                match frame {
                    Frame::Text(text) => {
                        yield Ok(GenerateChunk {
                            response: Some(text.to_string()),
                            ..Default::default()
                        });
                    }
                    Frame::Raw(chunk) => yield Ok(chunk),
                    Frame::Fail(e) => {
                        yield Err(e);
                        return;
                    }
                    Frame::Hang => futures::future::pending::<()>().await,
                    Frame::Panic(message) => panic!("{message}"),
                }
            }
        };
        Ok(Box::pin(stream))
    }

    async fn list_models(&self) -> tutor_llms::Result<Vec<String>> {
        Ok(vec!["scripted".to_string()])
    }
}
