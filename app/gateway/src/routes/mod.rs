//! HTTP routes.

use crate::AppState;
use axum::{
    Router,
    http::HeaderMap,
    routing::{get, post},
};

mod chat;
mod models;
mod sources;
mod user_settings;

/// Header carrying a JSON-encoded settings override.
pub const SETTINGS_HEADER: &str = "x-studybuddy-settings";

/// Build the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/getChat", post(chat::get_chat))
        .route("/api/getSources", post(sources::get_sources))
        .route("/api/models", post(models::list))
        .route("/api/settings", get(user_settings::read).post(user_settings::write))
        .with_state(state)
}

/// The raw settings override carried by a request, if any.
fn settings_override(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(SETTINGS_HEADER)?;
    match value.to_str() {
        Ok(raw) => Some(raw),
        Err(_) => {
            tracing::warn!("ignoring settings header that is not valid UTF-8");
            None
        }
    }
}
