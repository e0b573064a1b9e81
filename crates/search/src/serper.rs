//! Serper (Google search proxy).

use crate::{SearchEngine, SearchError, SearchResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Public API endpoint.
pub const ENDPOINT: &str = "https://google.serper.dev/search";

#[derive(Serialize)]
struct Request<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Deserialize)]
struct Response {
    organic: Vec<Organic>,
}

#[derive(Deserialize)]
struct Organic {
    title: String,
    link: String,
}

/// Query Serper.
pub async fn search(
    client: &Client,
    endpoint: &str,
    key: &str,
    query: &str,
) -> Result<Vec<SearchResult>, SearchError> {
    let engine = SearchEngine::Serper;
    let response = client
        .post(endpoint)
        .header("X-API-KEY", key)
        .json(&Request {
            q: query,
            num: engine.cap(),
        })
        .send()
        .await
        .map_err(|source| SearchError::Transport { engine, source })?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| SearchError::Transport { engine, source })?;
    if !status.is_success() {
        return Err(SearchError::Status {
            engine,
            status: status.as_u16(),
            body,
        });
    }

    let parsed: Response =
        serde_json::from_str(&body).map_err(|source| SearchError::Parse { engine, source })?;
    Ok(parsed
        .organic
        .into_iter()
        .map(|o| SearchResult::new(o.title, o.link))
        .collect())
}
