//! Provider crate: centralizes chat provider enum dispatch, configuration,
//! construction, and model discovery.
//!
//! `Provider` enum wraps the concrete adapters (Ollama, OpenAI-compatible,
//! Claude, Gemini) behind a unified `Llm` impl. `build_provider()` selects the
//! adapter from a `ProviderConfig` by exhaustive match over `ProviderKind`,
//! failing before any network call when the name is unknown or a required
//! credential is missing.

pub mod claude;
pub mod config;
mod error;
pub mod gemini;
pub mod models;
pub mod ollama;
pub mod openai;
mod provider;

pub use {
    config::{ProviderConfig, ProviderKind},
    error::ProviderError,
    models::{ANTHROPIC_MODELS, list_models},
    provider::{Provider, build_provider, http_client},
};
