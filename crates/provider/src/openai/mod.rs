//! OpenAI-compatible provider.
//!
//! Covers OpenAI, Groq and Together, which share the chat completions wire
//! format and differ only in base URL and key.

use crate::ProviderKind;
use futures_core::Stream;
use llm::{Client, Frame, HttpProvider, Llm, StreamChunk, StreamRequest, Wire};
pub use request::Request;
use serde::Deserialize;

mod request;

/// Chat path appended to the base URL.
pub const CHAT_PATH: &str = "/v1/chat/completions";

/// The OpenAI-compatible provider.
#[derive(Clone)]
pub struct OpenAI {
    http: HttpProvider,
    kind: ProviderKind,
}

impl OpenAI {
    /// Create a provider for `kind` at `base_url`, authenticating with a Bearer key.
    pub fn new(client: Client, kind: ProviderKind, key: &str, base_url: &str) -> llm::Result<Self> {
        let endpoint = format!("{}{CHAT_PATH}", base_url.trim_end_matches('/'));
        Ok(Self {
            http: HttpProvider::bearer(client, key, &endpoint)?,
            kind,
        })
    }

    /// Which vendor this instance talks to.
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// The chat endpoint.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }
}

impl Llm for OpenAI {
    fn stream(
        &self,
        request: StreamRequest,
    ) -> impl Stream<Item = llm::Result<StreamChunk>> + Send + 'static {
        let body = Request::from(request);
        self.http.stream(&body, Wire::Sse, parse_event)
    }
}

#[derive(Deserialize)]
struct Completion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    delta: Option<Delta>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// Decode one `data:` payload.
///
/// Tool-call deltas and usage-only chunks carry no text and are skipped; a
/// `finish_reason` or the `[DONE]` sentinel ends the stream.
pub(crate) fn parse_event(payload: &str) -> Frame {
    if payload.trim() == "[DONE]" {
        return Frame::done();
    }
    let completion = match serde_json::from_str::<Completion>(payload) {
        Ok(completion) => completion,
        Err(e) => {
            tracing::warn!("failed to parse chunk: {e}, data: {payload}");
            return Frame::skip();
        }
    };
    let Some(choice) = completion.choices.into_iter().next() else {
        return Frame::skip();
    };
    Frame {
        text: choice.delta.and_then(|d| d.content),
        done: choice.finish_reason.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_event;
    use llm::Frame;

    #[test]
    fn delta_content() {
        let frame = parse_event(r#"{"id":"x","choices":[{"index":0,"delta":{"content":"Hi"},"finish_reason":null}]}"#);
        assert_eq!(frame, Frame::text("Hi"));
    }

    #[test]
    fn finish_reason_and_sentinel_end_stream() {
        assert!(parse_event(r#"{"choices":[{"delta":{},"finish_reason":"stop"}]}"#).done);
        assert!(parse_event("[DONE]").done);
    }

    #[test]
    fn tool_calls_and_usage_are_skipped() {
        let tool = r#"{"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"arguments":"{"}}]},"finish_reason":null}]}"#;
        assert_eq!(parse_event(tool), Frame::skip());
        assert_eq!(parse_event(r#"{"choices":[],"usage":{"total_tokens":3}}"#), Frame::skip());
    }
}
