//! Google Gemini provider.
//!
//! The model is part of the URL (`/v1beta/models/{model}:streamGenerateContent`),
//! so every request resolves its own endpoint. Responses are requested as an
//! event stream with `alt=sse`.

use futures_core::Stream;
use llm::{Client, HttpProvider, Llm, StreamChunk, StreamRequest, Wire};
pub use request::Request;

mod request;
mod stream;

/// Model collection path appended to the base URL.
pub const MODELS_PATH: &str = "/v1beta/models";

/// The Gemini provider.
#[derive(Clone)]
pub struct Gemini {
    /// Headers plus the base URL; the per-model endpoint is derived on each call.
    http: HttpProvider,
}

impl Gemini {
    /// Create a provider authenticating with `x-goog-api-key`.
    pub fn new(client: Client, key: &str, base_url: &str) -> llm::Result<Self> {
        let base = base_url.trim_end_matches('/');
        let http = HttpProvider::custom_header(client, "x-goog-api-key", key, base)?;
        Ok(Self { http })
    }

    /// The streaming endpoint for `model`.
    pub fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!(
            "{}{MODELS_PATH}/{model}:streamGenerateContent?alt=sse",
            self.http.endpoint()
        )
    }
}

impl Llm for Gemini {
    fn stream(
        &self,
        request: StreamRequest,
    ) -> impl Stream<Item = llm::Result<StreamChunk>> + Send + 'static {
        let endpoint = self.endpoint(&request.model);
        let body = Request::from(request);
        self.http.stream_at(&endpoint, &body, Wire::Sse, stream::parse_event)
    }
}
