//! Gemini streaming chunk parsing.

use llm::Frame;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Chunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Decode one `data:` payload. The text of a chunk is the concatenation of
/// its first candidate's parts; a `finishReason` ends the stream.
pub(crate) fn parse_event(data: &str) -> Frame {
    let chunk = match serde_json::from_str::<Chunk>(data) {
        Ok(chunk) => chunk,
        Err(e) => {
            tracing::warn!("failed to parse gemini chunk: {e}, data: {data}");
            return Frame::skip();
        }
    };
    let Some(candidate) = chunk.candidates.into_iter().next() else {
        return Frame::skip();
    };
    let text: String = candidate
        .content
        .into_iter()
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .collect();
    Frame {
        text: Some(text),
        done: candidate.finish_reason.is_some(),
    }
}
