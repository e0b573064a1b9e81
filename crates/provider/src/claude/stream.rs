//! SSE event parsing for the Anthropic streaming Messages API.
//!
//! Anthropic streaming events differ from OpenAI's format:
//! - `message_start`: initial message metadata
//! - `content_block_start`: begin a content block (text or tool_use)
//! - `content_block_delta`: incremental content (text_delta or input_json_delta)
//! - `content_block_stop`: end of a content block
//! - `message_delta`: final stop_reason and usage
//! - `message_stop`: end of message
//!
//! Only text reaches the caller; everything else is a control message.

use llm::Frame;
use serde::Deserialize;

/// A raw SSE event from the Anthropic streaming API.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Begin a content block.
    ContentBlockStart { content_block: ContentBlock },
    /// Incremental content within a block.
    ContentBlockDelta { delta: BlockDelta },
    /// End of message.
    MessageStop,
    /// Vendor error event (e.g. `overloaded_error`).
    Error { error: ApiError },
    /// message_start, content_block_stop, message_delta, ping, ...
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockDelta {
    TextDelta { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

impl Event {
    /// Convert this event to a frame.
    pub fn into_frame(self) -> Frame {
        match self {
            Self::ContentBlockStart {
                content_block: ContentBlock::Text { text },
            } => Frame::text(text),
            Self::ContentBlockDelta {
                delta: BlockDelta::TextDelta { text },
            } => Frame::text(text),
            Self::MessageStop => Frame::done(),
            Self::Error { error } => {
                tracing::error!(kind = %error.kind, message = %error.message, "anthropic stream error");
                Frame::done()
            }
            Self::ContentBlockStart { .. } | Self::ContentBlockDelta { .. } | Self::Other => {
                Frame::skip()
            }
        }
    }
}

/// Decode one `data:` payload.
pub(crate) fn parse_event(data: &str) -> Frame {
    if data.trim() == "[DONE]" {
        return Frame::done();
    }
    match serde_json::from_str::<Event>(data) {
        Ok(event) => event.into_frame(),
        Err(e) => {
            tracing::warn!("failed to parse anthropic event: {e}, data: {data}");
            Frame::skip()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_event;
    use llm::Frame;

    #[test]
    fn text_delta() {
        let data = r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hello"}}"#;
        assert_eq!(parse_event(data), Frame::text("Hello"));
    }

    #[test]
    fn control_events_are_skipped() {
        for data in [
            r#"{"type":"message_start","message":{"id":"msg_1","model":"claude"}}"#,
            r#"{"type":"content_block_start","index":1,"content_block":{"type":"tool_use","id":"t","name":"n","input":{}}}"#,
            r#"{"type":"content_block_delta","index":1,"delta":{"type":"input_json_delta","partial_json":"{\"a\""}}"#,
            r#"{"type":"content_block_stop","index":0}"#,
            r#"{"type":"message_delta","delta":{"stop_reason":"end_turn"},"usage":{"output_tokens":5}}"#,
            r#"{"type":"ping"}"#,
        ] {
            assert_eq!(parse_event(data), Frame::skip(), "{data}");
        }
    }

    #[test]
    fn message_stop_and_error_end_stream() {
        assert!(parse_event(r#"{"type":"message_stop"}"#).done);
        assert!(parse_event(r#"{"type":"error","error":{"type":"overloaded_error","message":"busy"}}"#).done);
    }
}
