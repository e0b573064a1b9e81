//! SearxNG metasearch backend.
//!
//! Requests are spaced by a shared [`RateLimiter`]. A failed attempt is
//! retried with capped exponential backoff; once a candidate path is
//! exhausted the next one is tried. When every attempt fails the caller gets
//! a [`MetasearchFailure`] describing the last failure, never an empty list.

use crate::{MetasearchFailure, SearchError, SearchResult, error::FailureKind};
use rand::Rng;
use reqwest::{Client, header};
use serde::Deserialize;
use std::{sync::Arc, time::Duration};

pub use limiter::RateLimiter;

mod limiter;

/// Paths tried in order on the configured server.
pub const CANDIDATE_PATHS: [&str; 2] = ["/search", "/"];

/// User agent sent to SearxNG servers.
const USER_AGENT: &str = "StudyBuddy/1.0";

/// Retry policy for one candidate path.
#[derive(Debug, Clone, Copy)]
pub struct Retry {
    /// Retries after the first attempt.
    pub retries: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub base: Duration,
    /// Upper bound on any single delay, jitter included.
    pub cap: Duration,
    /// Time budget of a single attempt.
    pub timeout: Duration,
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            retries: 3,
            base: Duration::from_millis(500),
            cap: Duration::from_secs(4),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Retry {
    /// The delay before retry number `retry` (1-based).
    pub fn delay(&self, retry: u32) -> Duration {
        let exp = self
            .base
            .saturating_mul(2u32.saturating_pow(retry.saturating_sub(1)))
            .min(self.cap);
        let spread = (exp.as_millis() / 4) as u64;
        let jitter = if spread == 0 {
            0
        } else {
            rand::rng().random_range(0..=spread)
        };
        (exp + Duration::from_millis(jitter)).min(self.cap)
    }
}

#[derive(Deserialize)]
struct Response {
    results: Vec<Hit>,
}

#[derive(Deserialize)]
struct Hit {
    title: String,
    url: String,
}

/// The SearxNG client. Clones share one rate limiter.
#[derive(Debug, Clone)]
pub struct Searxng {
    limiter: Arc<RateLimiter>,
    retry: Retry,
}

impl Default for Searxng {
    fn default() -> Self {
        Self::new(Arc::new(RateLimiter::default()), Retry::default())
    }
}

impl Searxng {
    /// Create a client with the given limiter and retry policy.
    pub fn new(limiter: Arc<RateLimiter>, retry: Retry) -> Self {
        Self { limiter, retry }
    }

    /// The shared limiter.
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Query the server at `base_url`.
    pub async fn search(
        &self,
        client: &Client,
        base_url: &str,
        query: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let base = base_url.trim().trim_end_matches('/');
        let mut last = MetasearchFailure {
            kind: FailureKind::Connection,
            message: "no attempt made".to_owned(),
        };

        for path in CANDIDATE_PATHS {
            let endpoint = format!("{base}{path}");
            for attempt in 0..=self.retry.retries {
                if attempt > 0 {
                    tokio::time::sleep(self.retry.delay(attempt)).await;
                }
                self.limiter.acquire(base).await;
                match self.attempt(client, &endpoint, query).await {
                    Ok(results) => return Ok(results),
                    Err(failure) => {
                        tracing::warn!(%endpoint, attempt, kind = %failure.kind, "searxng attempt failed: {}", failure.message);
                        last = failure;
                    }
                }
            }
        }

        tracing::error!(server = %base, kind = %last.kind, "searxng exhausted every attempt");
        Err(last.into())
    }

    async fn attempt(
        &self,
        client: &Client,
        endpoint: &str,
        query: &str,
    ) -> Result<Vec<SearchResult>, MetasearchFailure> {
        let response = client
            .get(endpoint)
            .query(&[("q", query), ("format", "json"), ("categories", "general")])
            .header(header::USER_AGENT, USER_AGENT)
            .timeout(self.retry.timeout)
            .send()
            .await
            .map_err(|e| MetasearchFailure::from_transport(&e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MetasearchFailure::from_transport(&e))?;
        if !status.is_success() {
            return Err(MetasearchFailure {
                kind: FailureKind::Status,
                message: format!("{status}: {body}"),
            });
        }

        let parsed: Response = serde_json::from_str(&body).map_err(|e| MetasearchFailure {
            kind: FailureKind::Parse,
            message: e.to_string(),
        })?;
        Ok(parsed
            .results
            .into_iter()
            .map(|h| SearchResult::new(h.title, h.url))
            .collect())
    }
}
