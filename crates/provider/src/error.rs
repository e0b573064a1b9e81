//! Provider error taxonomy.

use crate::ProviderKind;

/// Errors raised while selecting, building or querying a provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider name is not one of the supported kinds.
    #[error("unsupported provider: {0}")]
    Unsupported(String),

    /// A keyed provider was configured without a credential.
    #[error("{0} requires an API key")]
    MissingCredential(ProviderKind),

    /// Adapter construction or streaming transport failure.
    #[error(transparent)]
    Llm(#[from] llm::Error),

    /// The vendor answered with a non-success status.
    #[error("{kind} API error: {status} {body}")]
    Status {
        /// The provider that answered.
        kind: ProviderKind,
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the vendor.
        body: String,
    },

    /// The vendor response did not match the expected schema.
    #[error("failed to decode {kind} response: {source}")]
    Decode {
        /// The provider that answered.
        kind: ProviderKind,
        /// The schema mismatch.
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP request could not be completed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ProviderError {
    /// Whether this is a configuration error (raised before any network call).
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Unsupported(_) | Self::MissingCredential(_) | Self::Llm(llm::Error::InvalidHeader(_))
        )
    }
}
