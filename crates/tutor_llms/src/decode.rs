//! Newline-delimited JSON framing.
//!
//! The body arrives in arbitrary byte chunks: a line may span several reads
//! and one read may hold several lines. `LineDecoder` re-frames the bytes,
//! `decode_chunk` turns one frame into a [`GenerateChunk`] or drops it.

use bytes::{Bytes, BytesMut};

use crate::types::GenerateChunk;

/// Splits a byte stream into `\n`-terminated lines.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buf: BytesMut,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes; returns every line completed by them, without the newline.
    pub fn push(&mut self, data: &[u8]) -> Vec<Bytes> {
        self.buf.extend_from_slice(data);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let mut line = self.buf.split_to(pos + 1);
            line.truncate(pos);
            lines.push(line.freeze());
        }
        lines
    }

    /// Take the trailing line left without a newline at end of body.
    pub fn finish(&mut self) -> Option<Bytes> {
        if self.buf.is_empty() {
            None
        } else {
            Some(self.buf.split().freeze())
        }
    }
}

/// Decode one frame. Blank and malformed frames yield `None`.
pub fn decode_chunk(line: &[u8]) -> Option<GenerateChunk> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return None;
    }

    match serde_json::from_slice::<GenerateChunk>(line) {
        Ok(chunk) => Some(chunk),
        Err(e) => {
            tracing::warn!(
                error = %e,
                bytes = line.len(),
                "JSON decoding failed for a line from the response stream"
            );
            None
        }
    }
}
