//! Ollama streaming support
//!
//! Ollama streams `application/x-ndjson`: one JSON object per line,
//! `{"response":"..."}` for text deltas and a final `{"done":true,...}`.

use std::time::Duration;

use futures::stream::StreamExt;

use crate::decode::{LineDecoder, decode_chunk};
use crate::error::Error;
use crate::types::ChunkStream;

/// Create a frame stream from an accepted response.
///
/// The response is owned by the stream, so dropping the stream releases
/// the connection even when the body was not fully read.
pub(crate) fn create_stream(response: reqwest::Response, idle_timeout: Option<Duration>) -> ChunkStream {
    let stream = async_stream::stream! {
        let mut body = response.bytes_stream();
        let mut decoder = LineDecoder::new();

        loop {
            let next = match idle_timeout {
                Some(limit) => match tokio::time::timeout(limit, body.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        yield Err(Error::Timeout(limit));
                        break;
                    }
                },
                None => body.next().await,
            };

            match next {
                Some(Ok(bytes)) => {
                    for line in decoder.push(&bytes) {
                        if let Some(chunk) = decode_chunk(&line) {
                            yield Ok(chunk);
                        }
                    }
                }
                Some(Err(e)) => {
                    yield Err(Error::stream_error(format!("failed to read response body: {}", e)));
                    break;
                }
                None => {
                    if let Some(chunk) = decoder.finish().and_then(|line| decode_chunk(&line)) {
                        yield Ok(chunk);
                    }
                    break;
                }
            }
        }
    };

    Box::pin(stream)
}
