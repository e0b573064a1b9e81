//! Model discovery.
//!
//! Lists the model identifiers a provider offers so clients can populate a
//! picker. Anthropic has no listing endpoint and answers from a fixed list.

use crate::{ProviderError, ProviderKind, gemini};
use llm::Client;
use serde::Deserialize;

/// Models offered for Anthropic, newest first.
pub const ANTHROPIC_MODELS: [&str; 5] = [
    "claude-3-5-sonnet-20241022",
    "claude-3-5-haiku-20241022",
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
];

/// Listing path for OpenAI-compatible vendors.
const OPENAI_MODELS_PATH: &str = "/v1/models";

/// Listing path for Ollama.
const OLLAMA_TAGS_PATH: &str = "/api/tags";

#[derive(Deserialize)]
struct Tags {
    #[serde(default)]
    models: Vec<Tag>,
}

#[derive(Deserialize)]
struct Tag {
    name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModelList {
    Wrapped { data: Vec<ModelId> },
    Bare(Vec<ModelId>),
}

#[derive(Deserialize)]
struct ModelId {
    id: String,
}

#[derive(Deserialize)]
struct GoogleModels {
    #[serde(default)]
    models: Vec<GoogleModel>,
}

#[derive(Deserialize)]
struct GoogleModel {
    name: String,
}

/// List the models offered by `kind` at `base_url`.
///
/// `base_url` falls back to the kind's default when empty. Keyed kinds fail
/// with [`ProviderError::MissingCredential`] before any request when no key
/// is given. A non-success status is returned as [`ProviderError::Status`]
/// and never retried.
pub async fn list_models(
    client: &Client,
    kind: ProviderKind,
    base_url: &str,
    api_key: Option<&str>,
) -> Result<Vec<String>, ProviderError> {
    let Some(path) = listing_path(kind) else {
        return Ok(ANTHROPIC_MODELS.iter().map(|m| (*m).to_owned()).collect());
    };

    let api_key = api_key.map(str::trim).filter(|k| !k.is_empty());
    if kind.requires_key() && api_key.is_none() {
        return Err(ProviderError::MissingCredential(kind));
    }
    let base = match base_url.trim() {
        "" => kind.default_base_url(),
        url => url,
    }
    .trim_end_matches('/');

    let request = client.get(format!("{base}{path}"));
    let request = match (kind, api_key) {
        (ProviderKind::Google, Some(key)) => request.header("x-goog-api-key", key),
        (_, Some(key)) => request.bearer_auth(key),
        (_, None) => request,
    };

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        tracing::warn!(%kind, status = status.as_u16(), "model listing failed");
        return Err(ProviderError::Status {
            kind,
            status: status.as_u16(),
            body,
        });
    }

    let decode = |source| ProviderError::Decode { kind, source };
    let models = match kind {
        ProviderKind::Ollama => serde_json::from_str::<Tags>(&body)
            .map_err(decode)?
            .models
            .into_iter()
            .map(|t| t.name)
            .collect(),
        ProviderKind::Google => serde_json::from_str::<GoogleModels>(&body)
            .map_err(decode)?
            .models
            .into_iter()
            .map(|m| match m.name.strip_prefix("models/") {
                Some(name) => name.to_owned(),
                None => m.name,
            })
            .collect(),
        _ => match serde_json::from_str::<ModelList>(&body).map_err(decode)? {
            ModelList::Wrapped { data } | ModelList::Bare(data) => {
                data.into_iter().map(|m| m.id).collect()
            }
        },
    };
    Ok(models)
}

/// The listing path for `kind`, or `None` when the list is fixed.
fn listing_path(kind: ProviderKind) -> Option<&'static str> {
    match kind {
        ProviderKind::Ollama => Some(OLLAMA_TAGS_PATH),
        ProviderKind::Google => Some(gemini::MODELS_PATH),
        ProviderKind::OpenAI | ProviderKind::Groq | ProviderKind::Together => {
            Some(OPENAI_MODELS_PATH)
        }
        ProviderKind::Anthropic => None,
    }
}
