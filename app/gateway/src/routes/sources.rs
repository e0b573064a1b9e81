//! `POST /api/getSources`: web search for the sources panel.

use crate::{ApiError, AppState, routes::settings_override};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use search::{SearchError, SearchResult};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SourcesBody {
    question: String,
}

pub async fn get_sources(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<SourcesBody>, JsonRejection>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let settings = state.settings.resolve(settings_override(&headers));
    match state.search.search(&body.question, &settings).await {
        Ok(results) => Ok(Json(results)),
        Err(e) if e.is_config() => {
            tracing::warn!(engine = %settings.search_engine, "search misconfigured: {e}");
            Err(ApiError::BadRequest(e.to_string()))
        }
        Err(SearchError::Metasearch(failure)) => Err(ApiError::Internal(failure.to_string())),
        Err(e @ SearchError::Parse { .. }) => Err(ApiError::Internal(e.to_string())),
        Err(e) => {
            tracing::error!(engine = %settings.search_engine, "search failed: {e}");
            Err(ApiError::Internal(e.to_string()))
        }
    }
}
