//! Request body for `streamGenerateContent`.

use llm::{Role, StreamRequest};
use serde::Serialize;

/// Output token limit used when the request sets none.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// `user` or `model`. Absent on the system instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub max_output_tokens: u32,
}

impl From<StreamRequest> for Request {
    fn from(req: StreamRequest) -> Self {
        let mut system = Vec::new();
        let mut contents = Vec::with_capacity(req.messages.len());
        for msg in req.messages {
            let role = match msg.role {
                Role::System => {
                    system.push(msg.content);
                    continue;
                }
                Role::User => "user",
                Role::Assistant => "model",
            };
            contents.push(Content {
                role: Some(role),
                parts: vec![Part { text: msg.content }],
            });
        }

        Self {
            contents,
            system_instruction: (!system.is_empty()).then(|| Content {
                role: None,
                parts: vec![Part {
                    text: system.join("\n\n"),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: req.temperature,
                max_output_tokens: req.max_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
            },
        }
    }
}
