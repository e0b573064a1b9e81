//! Transport errors shared by every adapter.

/// Result alias for streaming operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while talking to a vendor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A header value could not be built (e.g. a key with control characters).
    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    /// Request serialization failed.
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The HTTP transport failed (connect, read, timeout).
    #[cfg(feature = "http")]
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
