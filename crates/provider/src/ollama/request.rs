//! Request body for the Ollama chat API.

use llm::{ChatMessage, StreamRequest};
use serde::Serialize;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default `num_predict`.
pub const DEFAULT_NUM_PREDICT: u32 = 2048;

/// The request body for `/api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,
    /// The messages, roles unchanged.
    pub messages: Vec<ChatMessage>,
    /// Whether to stream.
    pub stream: bool,
    /// Sampling options.
    pub options: Options,
}

/// Ollama sampling options.
#[derive(Debug, Clone, Serialize)]
pub struct Options {
    /// Temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub num_predict: u32,
}

impl From<StreamRequest> for Request {
    fn from(req: StreamRequest) -> Self {
        Self {
            model: req.model,
            messages: req.messages,
            stream: req.stream,
            options: Options {
                temperature: req.temperature.unwrap_or(DEFAULT_TEMPERATURE),
                num_predict: req.max_tokens.unwrap_or(DEFAULT_NUM_PREDICT),
            },
        }
    }
}
