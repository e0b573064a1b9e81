//! Ollama provider.
//!
//! Talks to the native `/api/chat` endpoint, which streams one JSON object
//! per line and marks the last one with `"done": true`.

use futures_core::Stream;
use llm::{Client, Frame, HttpProvider, Llm, StreamChunk, StreamRequest, Wire};
pub use request::Request;
use serde::Deserialize;

mod request;

/// Chat path appended to the base URL.
pub const CHAT_PATH: &str = "/api/chat";

/// The Ollama provider.
#[derive(Clone)]
pub struct Ollama {
    http: HttpProvider,
}

impl Ollama {
    /// Create a provider for the server at `base_url`.
    ///
    /// A key is optional; when present it is sent as a Bearer token (for
    /// servers behind an authenticating proxy).
    pub fn new(client: Client, base_url: &str, key: Option<&str>) -> llm::Result<Self> {
        let endpoint = format!("{}{CHAT_PATH}", base_url.trim_end_matches('/'));
        let http = match key {
            Some(key) => HttpProvider::bearer(client, key, &endpoint)?,
            None => HttpProvider::no_auth(client, &endpoint),
        };
        Ok(Self { http })
    }

    /// The chat endpoint.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }
}

impl Llm for Ollama {
    fn stream(
        &self,
        request: StreamRequest,
    ) -> impl Stream<Item = llm::Result<StreamChunk>> + Send + 'static {
        let body = Request::from(request);
        self.http.stream(&body, Wire::Ndjson, parse_line)
    }
}

#[derive(Deserialize)]
struct Line {
    #[serde(default)]
    message: Option<LineMessage>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct LineMessage {
    #[serde(default)]
    content: String,
}

/// Decode one NDJSON line.
pub(crate) fn parse_line(payload: &str) -> Frame {
    let line = match serde_json::from_str::<Line>(payload) {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!("failed to parse ollama line: {e}, data: {payload}");
            return Frame::skip();
        }
    };
    if let Some(error) = line.error {
        tracing::error!(%error, "ollama reported an error mid-stream");
        return Frame::done();
    }
    Frame {
        text: line.message.map(|m| m.content),
        done: line.done,
    }
}
