//! `POST /api/models`: model discovery for the settings page.

use crate::{ApiError, AppState};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use provider::{ProviderError, ProviderKind};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelsBody {
    provider: String,
    #[serde(default)]
    base_url: String,
    #[serde(default)]
    api_key: Option<String>,
}

#[derive(Serialize)]
pub struct ModelsResponse {
    models: Vec<String>,
}

pub async fn list(
    State(state): State<AppState>,
    body: Result<Json<ModelsBody>, JsonRejection>,
) -> Result<Json<ModelsResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let kind: ProviderKind = body
        .provider
        .parse()
        .map_err(|_| ApiError::BadRequest("Unsupported provider".to_owned()))?;

    match provider::list_models(&state.client, kind, &body.base_url, body.api_key.as_deref()).await {
        Ok(models) => Ok(Json(ModelsResponse { models })),
        Err(e @ ProviderError::MissingCredential(_)) => Err(ApiError::BadRequest(e.to_string())),
        Err(e) => {
            tracing::warn!(%kind, "model listing failed: {e}");
            Err(ApiError::Upstream {
                error: "Failed to fetch models",
                details: e.to_string(),
            })
        }
    }
}
