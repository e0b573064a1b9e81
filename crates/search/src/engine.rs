//! Search engine selection.

use crate::SearchError;
use std::{fmt, str::FromStr};

/// Supported search backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchEngine {
    /// Bing Web Search API. Keyed.
    Bing,
    /// Serper (Google results proxy). Keyed.
    Serper,
    /// A self-hosted SearxNG server.
    Searxng,
    /// DuckDuckGo's HTML frontend, scraped. Keyless.
    DuckDuckGo,
    /// No search.
    Disabled,
}

impl SearchEngine {
    /// Every supported engine.
    pub const ALL: [Self; 5] = [
        Self::Bing,
        Self::Serper,
        Self::Searxng,
        Self::DuckDuckGo,
        Self::Disabled,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bing => "bing",
            Self::Serper => "serper",
            Self::Searxng => "searxng",
            Self::DuckDuckGo => "duckduckgo",
            Self::Disabled => "disabled",
        }
    }

    /// Maximum number of results returned.
    pub fn cap(&self) -> usize {
        match self {
            Self::Bing | Self::DuckDuckGo => 6,
            Self::Serper | Self::Searxng => 9,
            Self::Disabled => 0,
        }
    }

    /// The setting this engine cannot run without, if any.
    pub fn requirement(&self) -> Option<&'static str> {
        match self {
            Self::Bing | Self::Serper => Some("an API key"),
            Self::Searxng => Some("a server URL"),
            Self::DuckDuckGo | Self::Disabled => None,
        }
    }
}

impl FromStr for SearchEngine {
    type Err = SearchError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bing" => Ok(Self::Bing),
            "serper" => Ok(Self::Serper),
            "searxng" => Ok(Self::Searxng),
            "duckduckgo" | "ddg" => Ok(Self::DuckDuckGo),
            "disabled" | "none" => Ok(Self::Disabled),
            _ => Err(SearchError::UnknownEngine(name.to_owned())),
        }
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
