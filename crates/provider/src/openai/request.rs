//! OpenAI-compatible chat completions request body.

use llm::{ChatMessage, StreamRequest};
use serde::Serialize;

/// Chat completions request body.
///
/// Optional fields are absent from the body when unset so each vendor
/// applies its own default.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,
    /// The messages to send.
    pub messages: Vec<ChatMessage>,
    /// Whether to stream the response.
    pub stream: bool,
    /// Temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl From<StreamRequest> for Request {
    fn from(req: StreamRequest) -> Self {
        Self {
            model: req.model,
            messages: req.messages,
            stream: req.stream,
            temperature: req.temperature,
            max_tokens: req.max_tokens,
        }
    }
}
