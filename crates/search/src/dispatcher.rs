//! Backend selection and result post-processing.

use crate::{SearchEngine, SearchError, SearchResult, Searxng, bing, duckduckgo, query, serper};
use reqwest::Client;
use settings::AppSettings;

/// Domains whose results are never returned, matched as URL substrings.
pub const EXCLUDED_SITES: &[&str] = &["youtube.com"];

/// Vendor endpoints. Overridable so tests can point at a mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Bing Web Search endpoint.
    pub bing: String,
    /// Serper endpoint.
    pub serper: String,
    /// DuckDuckGo HTML frontend.
    pub duckduckgo: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            bing: bing::ENDPOINT.to_owned(),
            serper: serper::ENDPOINT.to_owned(),
            duckduckgo: duckduckgo::ENDPOINT.to_owned(),
        }
    }
}

/// Routes a question to the backend named by the settings.
#[derive(Debug, Clone)]
pub struct SearchDispatcher {
    client: Client,
    endpoints: Endpoints,
    searxng: Searxng,
}

impl SearchDispatcher {
    /// Create a dispatcher with the public endpoints and default SearxNG policy.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoints: Endpoints::default(),
            searxng: Searxng::default(),
        }
    }

    /// Replace the vendor endpoints.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Replace the SearxNG client (limiter and retry policy).
    pub fn with_searxng(mut self, searxng: Searxng) -> Self {
        self.searxng = searxng;
        self
    }

    /// Search for `question` with the engine selected in `settings`.
    ///
    /// Configuration errors are returned before any request. A response that
    /// does not match the backend's schema is returned as
    /// [`SearchError::Parse`], and SearxNG exhaustion as
    /// [`SearchError::Metasearch`]. Other Bing, Serper and DuckDuckGo failures
    /// (transport, status) are logged and produce an empty list.
    pub async fn search(
        &self,
        question: &str,
        settings: &AppSettings,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let engine: SearchEngine = settings.search_engine.parse()?;
        if engine == SearchEngine::Disabled {
            return Ok(Vec::new());
        }
        let query = query(question);

        let fetched = match engine {
            SearchEngine::Bing => {
                let key = credential(engine, &settings.search_api_key)?;
                bing::search(&self.client, &self.endpoints.bing, key, &query, EXCLUDED_SITES).await
            }
            SearchEngine::Serper => {
                let key = credential(engine, &settings.search_api_key)?;
                serper::search(&self.client, &self.endpoints.serper, key, &query).await
            }
            SearchEngine::Searxng => {
                let url = credential(engine, &settings.search_url)?;
                let results = self.searxng.search(&self.client, url, &query).await?;
                Ok(results)
            }
            SearchEngine::DuckDuckGo => {
                duckduckgo::search(&self.client, &self.endpoints.duckduckgo, &query).await
            }
            SearchEngine::Disabled => Ok(Vec::new()),
        };

        let results = match fetched {
            Ok(results) => results,
            Err(e @ SearchError::Parse { .. }) => {
                tracing::error!(%engine, "search response did not match its schema: {e}");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(%engine, "search failed, returning no sources: {e}");
                Vec::new()
            }
        };
        let results = exclude(results, EXCLUDED_SITES, engine.cap());
        tracing::debug!(%engine, count = results.len(), "search complete");
        Ok(results)
    }
}

fn credential(engine: SearchEngine, value: &str) -> Result<&str, SearchError> {
    match value.trim() {
        "" => Err(SearchError::MissingCredential(engine)),
        value => Ok(value),
    }
}

/// Drop results whose URL contains an excluded domain, then keep at most
/// `cap`, preserving order.
pub fn exclude(results: Vec<SearchResult>, excluded: &[&str], cap: usize) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter(|r| !excluded.iter().any(|site| r.url.contains(site)))
        .take(cap)
        .collect()
}
