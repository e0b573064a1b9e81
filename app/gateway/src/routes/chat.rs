//! `POST /api/getChat`: stream an answer as server-sent events.

use crate::{ApiError, AppState, routes::settings_override};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, header},
    response::{
        IntoResponse, Response,
        sse::{Event, Sse},
    },
};
use futures_util::StreamExt;
use llm::{ChatMessage, Llm, StreamRequest};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ChatBody {
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct TextEvent<'a> {
    text: &'a str,
}

const DONE_EVENT: &str = r#"{"type":"done"}"#;

/// Resolve settings, build the provider and relay its chunks.
///
/// Nothing is sent until the provider yields its first item, so a factory
/// failure or an error before the first chunk still becomes a `202` notice.
/// Once streaming, a vendor error ends the stream; a client disconnect drops
/// the vendor response.
pub async fn get_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let settings = state.settings.resolve(settings_override(&headers));
    tracing::info!(
        provider = %settings.llm_provider,
        model = %settings.llm_model,
        has_api_key = !settings.llm_api_key.is_empty(),
        "chat request"
    );

    let provider = provider::build_provider(&settings.provider_config(), state.client.clone())
        .map_err(|e| {
            tracing::warn!("failed to build provider: {e}");
            ApiError::StreamFailed
        })?;

    let request = StreamRequest::new(settings.llm_model.clone(), body.messages);
    let mut chunks = Box::pin(provider.stream(request));
    let first = match chunks.next().await {
        Some(Ok(chunk)) => Some(chunk),
        Some(Err(e)) => {
            tracing::error!("answer stream failed: {e}");
            return Err(ApiError::StreamFailed);
        }
        None => None,
    };

    let done_marker = state.done_marker;
    let events = async_stream::stream! {
        if let Some(first) = first {
            yield Event::default().json_data(TextEvent { text: &first.text });
            while let Some(next) = chunks.next().await {
                match next {
                    Ok(chunk) => yield Event::default().json_data(TextEvent { text: &chunk.text }),
                    Err(e) => {
                        tracing::warn!("answer stream ended early: {e}");
                        break;
                    }
                }
            }
        }
        if done_marker {
            yield Ok(Event::default().data(DONE_EVENT));
        }
    };

    Ok(([(header::CACHE_CONTROL, "no-cache")], Sse::new(events)).into_response())
}
