//! Provider-neutral chat request.

use crate::ChatMessage;
use serde::{Deserialize, Serialize};

/// A streamed chat request, constructed per call and never persisted.
///
/// Each adapter maps this onto its vendor body, renaming and defaulting
/// `temperature` and `max_tokens` as the vendor requires.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamRequest {
    /// The model identifier.
    pub model: String,
    /// The conversation, in turn order.
    pub messages: Vec<ChatMessage>,
    /// Whether the vendor should stream.
    pub stream: bool,
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl StreamRequest {
    /// Create a streaming request for `model` over `messages`.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: true,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// The first system message, if any.
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == crate::Role::System)
            .map(|m| m.content.as_str())
    }
}
