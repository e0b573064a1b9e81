//! Provider implementation
//!
//! Unified `Provider` enum with enum dispatch over the vendor adapters.
//! `build_provider()` is synchronous: every check it performs is local, and
//! no request leaves the process until the returned provider is streamed.

use crate::{
    ProviderConfig, ProviderError, ProviderKind, claude::Claude, gemini::Gemini, ollama::Ollama,
    openai::OpenAI,
};
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{Client, Llm, StreamChunk, StreamRequest};
use std::time::Duration;

/// Unified chat provider enum.
///
/// The gateway builds one per request from the resolved settings.
#[derive(Clone)]
pub enum Provider {
    /// Native Ollama `/api/chat`.
    Ollama(Ollama),
    /// OpenAI-compatible chat completions (OpenAI, Groq, Together).
    OpenAI(OpenAI),
    /// Anthropic Messages API.
    Claude(Claude),
    /// Google Gemini.
    Gemini(Gemini),
}

impl Provider {
    /// The vendor behind this provider.
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Ollama(_) => ProviderKind::Ollama,
            Self::OpenAI(p) => p.kind(),
            Self::Claude(_) => ProviderKind::Anthropic,
            Self::Gemini(_) => ProviderKind::Google,
        }
    }
}

/// Construct a `Provider` from config and a shared HTTP client.
///
/// Fails with a configuration error, before any network call, when the name
/// is not a supported kind or a keyed kind has no key.
pub fn build_provider(config: &ProviderConfig, client: Client) -> Result<Provider, ProviderError> {
    let kind = config.kind()?;
    let key = config.api_key();
    if kind.requires_key() && key.is_none() {
        return Err(ProviderError::MissingCredential(kind));
    }
    let key = key.unwrap_or_default();
    let base_url = config.base_url(kind);

    let provider = match kind {
        ProviderKind::Ollama => Provider::Ollama(Ollama::new(client, base_url, config.api_key())?),
        ProviderKind::OpenAI | ProviderKind::Groq | ProviderKind::Together => {
            Provider::OpenAI(OpenAI::new(client, kind, key, base_url)?)
        }
        ProviderKind::Anthropic => Provider::Claude(Claude::new(client, key, base_url)?),
        ProviderKind::Google => Provider::Gemini(Gemini::new(client, key, base_url)?),
    };
    tracing::debug!(%kind, %base_url, model = %config.default_model, "built provider");
    Ok(provider)
}

/// Build the shared HTTP client.
///
/// Only connection setup and the gap between reads are bounded; a total
/// request timeout would cut long replies short.
pub fn http_client(connect: Duration, read: Duration) -> Result<Client, ProviderError> {
    Ok(Client::builder()
        .connect_timeout(connect)
        .read_timeout(read)
        .build()?)
}

impl Llm for Provider {
    fn stream(
        &self,
        request: StreamRequest,
    ) -> impl Stream<Item = llm::Result<StreamChunk>> + Send + 'static {
        let this = self.clone();
        try_stream! {
            match this {
                Provider::Ollama(p) => {
                    let mut stream = std::pin::pin!(p.stream(request));
                    while let Some(chunk) = stream.next().await {
                        yield chunk?;
                    }
                }
                Provider::OpenAI(p) => {
                    let mut stream = std::pin::pin!(p.stream(request));
                    while let Some(chunk) = stream.next().await {
                        yield chunk?;
                    }
                }
                Provider::Claude(p) => {
                    let mut stream = std::pin::pin!(p.stream(request));
                    while let Some(chunk) = stream.next().await {
                        yield chunk?;
                    }
                }
                Provider::Gemini(p) => {
                    let mut stream = std::pin::pin!(p.stream(request));
                    while let Some(chunk) = stream.next().await {
                        yield chunk?;
                    }
                }
            }
        }
    }
}
