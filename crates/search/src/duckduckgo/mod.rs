//! DuckDuckGo, scraped from the keyless HTML frontend.

use crate::{SearchEngine, SearchError, SearchResult};
use reqwest::{Client, header};
use std::time::Duration;

pub mod scrape;

/// HTML frontend endpoint.
pub const ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Time budget of one request.
pub const TIMEOUT: Duration = Duration::from_secs(10);

/// The frontend serves a reduced page to unknown agents.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Fetch and scrape a results page.
pub async fn search(
    client: &Client,
    endpoint: &str,
    query: &str,
) -> Result<Vec<SearchResult>, SearchError> {
    let engine = SearchEngine::DuckDuckGo;
    let response = client
        .get(endpoint)
        .query(&[("q", query)])
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .header(header::ACCEPT, "text/html")
        .timeout(TIMEOUT)
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

    let results = scrape::extract(&body);
    tracing::debug!(count = results.len(), "scraped duckduckgo results");
    Ok(results)
}
