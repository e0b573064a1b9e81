//! Request body for the Anthropic Messages API.

use llm::{Role, StreamRequest};
use serde::Serialize;

/// `max_tokens` is mandatory for Anthropic; used when the request sets none.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// The request body for the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// System prompt (top-level, not in messages array).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// The conversation turns, system messages removed.
    pub messages: Vec<Turn>,
    /// Whether to stream the response.
    pub stream: bool,
    /// Temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A user or assistant turn.
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    /// `user` or `assistant`.
    pub role: &'static str,
    /// Plain text content.
    pub content: String,
}

impl From<StreamRequest> for Request {
    fn from(req: StreamRequest) -> Self {
        let mut system: Vec<String> = Vec::new();
        let mut messages = Vec::with_capacity(req.messages.len());
        for msg in req.messages {
            match msg.role {
                Role::System => system.push(msg.content),
                role => messages.push(Turn {
                    role: role.as_str(),
                    content: msg.content,
                }),
            }
        }

        Self {
            model: req.model,
            max_tokens: req.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system: (!system.is_empty()).then(|| system.join("\n\n")),
            messages,
            stream: req.stream,
            temperature: req.temperature,
        }
    }
}
