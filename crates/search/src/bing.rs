//! Bing Web Search API.

use crate::{SearchEngine, SearchError, SearchResult};
use reqwest::Client;
use serde::Deserialize;

/// Public API endpoint.
pub const ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/search";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    web_pages: WebPages,
}

#[derive(Deserialize)]
struct WebPages {
    value: Vec<Page>,
}

#[derive(Deserialize)]
struct Page {
    name: String,
    url: String,
}

/// Query Bing. `query` is sent as-is with one `-site:` term per excluded domain.
pub async fn search(
    client: &Client,
    endpoint: &str,
    key: &str,
    query: &str,
    excluded: &[&str],
) -> Result<Vec<SearchResult>, SearchError> {
    let engine = SearchEngine::Bing;
    let mut q = query.to_owned();
    for site in excluded {
        q.push_str(" -site:");
        q.push_str(site);
    }
    let count = engine.cap().to_string();

    let response = client
        .get(endpoint)
        .query(&[
            ("q", q.as_str()),
            ("mkt", "en-US"),
            ("count", count.as_str()),
            ("safeSearch", "Strict"),
        ])
        .header("Ocp-Apim-Subscription-Key", key)
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
        .web_pages
        .value
        .into_iter()
        .map(|p| SearchResult::new(p.name, p.url))
        .collect())
}
