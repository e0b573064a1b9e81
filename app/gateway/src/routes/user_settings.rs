//! `GET|POST /api/settings`.

use crate::{ApiError, AppState};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use settings::AppSettings;

#[derive(Serialize)]
pub struct Saved {
    success: bool,
    message: &'static str,
}

/// The current settings with secrets masked.
pub async fn read(State(state): State<AppState>) -> Json<AppSettings> {
    Json(state.settings.current().masked())
}

/// Replace the runtime settings and persist them.
///
/// A secret posted back as the mask keeps its current value. A failed write
/// to disk is logged; the in-memory update still holds.
pub async fn write(
    State(state): State<AppState>,
    body: Result<Json<AppSettings>, JsonRejection>,
) -> Result<Json<Saved>, ApiError> {
    let Json(posted) = body.map_err(|e| {
        tracing::warn!("rejected settings update: {}", e.body_text());
        ApiError::BadRequest("Failed to update settings".to_owned())
    })?;

    let settings = posted.restore_masked(&state.settings.current());
    let applied = state.settings.update(settings);
    if let Some(file) = &state.file
        && let Err(e) = file.save(&applied)
    {
        tracing::warn!("failed to persist settings: {e:#}");
    }

    Ok(Json(Saved {
        success: true,
        message: "Settings updated successfully",
    }))
}
