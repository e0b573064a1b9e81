//! Search error taxonomy.

use crate::SearchEngine;
use std::fmt;

/// Errors raised by search backends and the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The engine name is not one of the supported engines.
    #[error("unsupported search engine: {0}")]
    UnknownEngine(String),

    /// A keyed engine has no key, or SearxNG has no URL.
    #[error("{0} search requires {req}", req = .0.requirement().unwrap_or("configuration"))]
    MissingCredential(SearchEngine),

    /// The HTTP request could not be completed.
    #[error("{engine} request failed: {source}")]
    Transport {
        /// The backend queried.
        engine: SearchEngine,
        /// The transport failure.
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("{engine} returned {status}: {body}")]
    Status {
        /// The backend queried.
        engine: SearchEngine,
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The response did not match the backend's schema.
    #[error("unexpected {engine} response: {source}")]
    Parse {
        /// The backend queried.
        engine: SearchEngine,
        /// The schema mismatch.
        #[source]
        source: serde_json::Error,
    },

    /// Every SearxNG attempt failed.
    #[error(transparent)]
    Metasearch(#[from] MetasearchFailure),
}

impl SearchError {
    /// Whether this is a configuration error (raised before any network call).
    pub fn is_config(&self) -> bool {
        matches!(self, Self::UnknownEngine(_) | Self::MissingCredential(_))
    }
}

/// Why the metasearch backend could not be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// An attempt exceeded its time budget.
    Timeout,
    /// The host name did not resolve.
    Dns,
    /// The TLS handshake failed.
    Tls,
    /// Any other connection failure.
    Connection,
    /// The server answered with a non-success status.
    Status,
    /// The server answered with something other than the JSON schema.
    Parse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Timeout => "timeout",
            Self::Dns => "dns",
            Self::Tls => "tls",
            Self::Connection => "connection",
            Self::Status => "status",
            Self::Parse => "parse",
        })
    }
}

/// The structured error returned once every SearxNG attempt has failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("SearxNG search failed ({kind}): {message}")]
pub struct MetasearchFailure {
    /// The class of the last failure.
    pub kind: FailureKind,
    /// Human-readable detail of the last failure.
    pub message: String,
}

impl MetasearchFailure {
    /// Classify a transport error.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        Self {
            kind: classify(err),
            message: err.to_string(),
        }
    }
}

fn classify(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        return FailureKind::Timeout;
    }
    let mut chain = String::new();
    let mut source: Option<&dyn std::error::Error> = Some(err);
    while let Some(e) = source {
        chain.push_str(&e.to_string().to_ascii_lowercase());
        chain.push('\n');
        source = e.source();
    }
    if chain.contains("dns") || chain.contains("lookup address") || chain.contains("name or service not known") {
        FailureKind::Dns
    } else if chain.contains("certificate") || chain.contains("tls") || chain.contains("ssl") {
        FailureKind::Tls
    } else {
        FailureKind::Connection
    }
}
