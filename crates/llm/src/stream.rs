//! Streaming response abstractions

use serde::{Deserialize, Serialize};

/// One incremental fragment of an assistant reply.
///
/// Concatenating the `text` of every chunk of one stream, in emission order,
/// reconstructs the full reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamChunk {
    /// The text fragment.
    pub text: String,
}

impl StreamChunk {
    /// Create a new chunk
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The result of decoding a single wire payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Text carried by the payload, if any.
    pub text: Option<String>,
    /// Whether the payload terminates the stream.
    pub done: bool,
}

impl Frame {
    /// A payload with nothing to emit (control message, ping, tool call).
    pub fn skip() -> Self {
        Self::default()
    }

    /// A payload carrying text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            done: false,
        }
    }

    /// The end-of-stream signal.
    pub fn done() -> Self {
        Self {
            text: None,
            done: true,
        }
    }

    /// Mark this frame as the last one.
    pub fn finish(mut self, done: bool) -> Self {
        self.done |= done;
        self
    }

    /// The chunk to emit, dropping empty fragments.
    pub fn into_chunk(self) -> Option<StreamChunk> {
        self.text.filter(|t| !t.is_empty()).map(StreamChunk::new)
    }
}
