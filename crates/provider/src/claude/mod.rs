//! Claude (Anthropic) provider.
//!
//! Implements the Anthropic Messages API, which differs from the OpenAI
//! chat completions format in message structure and streaming events.

use futures_core::Stream;
use llm::{Client, HttpProvider, Llm, StreamChunk, StreamRequest, Wire};
pub use request::Request;

mod request;
mod stream;

/// Messages path appended to the base URL.
pub const MESSAGES_PATH: &str = "/v1/messages";

/// The Anthropic API version header value.
const API_VERSION: &str = "2023-06-01";

/// The Claude provider.
#[derive(Clone)]
pub struct Claude {
    /// Request headers (x-api-key, anthropic-version, content-type).
    http: HttpProvider,
}

impl Claude {
    /// Create a provider targeting `base_url` (the Anthropic API or a compatible proxy).
    pub fn new(client: Client, key: &str, base_url: &str) -> llm::Result<Self> {
        let endpoint = format!("{}{MESSAGES_PATH}", base_url.trim_end_matches('/'));
        let mut http = HttpProvider::custom_header(client, "x-api-key", key, &endpoint)?;
        http.insert_header("anthropic-version", API_VERSION)?;
        Ok(Self { http })
    }

    /// The messages endpoint.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }
}

impl Llm for Claude {
    fn stream(
        &self,
        request: StreamRequest,
    ) -> impl Stream<Item = llm::Result<StreamChunk>> + Send + 'static {
        let body = Request::from(request);
        self.http.stream(&body, Wire::Sse, stream::parse_event)
    }
}
