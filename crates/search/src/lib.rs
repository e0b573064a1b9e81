//! Web search for studybuddy.
//!
//! Every backend normalizes its response to an ordered list of
//! [`SearchResult`]s. [`SearchDispatcher`] picks the backend named by the
//! resolved settings, applies the domain exclusion list and caps the list.

pub use {
    dispatcher::{EXCLUDED_SITES, Endpoints, SearchDispatcher},
    engine::SearchEngine,
    error::{FailureKind, MetasearchFailure, SearchError},
    result::SearchResult,
    searxng::{RateLimiter, Retry, Searxng},
};

pub mod bing;
mod dispatcher;
pub mod duckduckgo;
mod engine;
mod error;
mod result;
pub mod searxng;
pub mod serper;

/// Prefix applied to every question before it is sent to a search backend.
pub const QUERY_PREFIX: &str = "what is ";

/// The query sent to a backend for `question`.
pub fn query(question: &str) -> String {
    format!("{QUERY_PREFIX}{question}")
}
