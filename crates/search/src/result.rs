use serde::{Deserialize, Serialize};

/// One search hit: a page title and its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title.
    pub name: String,
    /// Destination URL.
    pub url: String,
}

impl SearchResult {
    /// Create a result.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
