//! Provider configuration
//!
//! `ProviderKind` is the closed set of supported chat backends. Names are
//! matched case-insensitively, with a few aliases; anything else is a
//! configuration error rather than a silent default.

use crate::ProviderError;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Supported chat provider kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Ollama local inference (native `/api/chat`, NDJSON). No key required.
    Ollama,
    /// OpenAI chat completions.
    OpenAI,
    /// Anthropic Messages API.
    Anthropic,
    /// Google Gemini `streamGenerateContent`.
    Google,
    /// Groq, OpenAI-compatible.
    Groq,
    /// Together AI, OpenAI-compatible.
    Together,
}

impl ProviderKind {
    /// Every supported kind.
    pub const ALL: [Self; 6] = [
        Self::Ollama,
        Self::OpenAI,
        Self::Anthropic,
        Self::Google,
        Self::Groq,
        Self::Together,
    ];

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Groq => "groq",
            Self::Together => "together",
        }
    }

    /// Prefix of the `<PREFIX>_API_KEY` / `_BASE_URL` / `_MODEL` env vars.
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Self::Ollama => "OLLAMA",
            Self::OpenAI => "OPENAI",
            Self::Anthropic => "ANTHROPIC",
            Self::Google => "GOOGLE",
            Self::Groq => "GROQ",
            Self::Together => "TOGETHER",
        }
    }

    /// Vendor base URL used when none is configured.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Ollama => "http://localhost:11434",
            Self::OpenAI => "https://api.openai.com",
            Self::Anthropic => "https://api.anthropic.com",
            Self::Google => "https://generativelanguage.googleapis.com",
            Self::Groq => "https://api.groq.com/openai",
            Self::Together => "https://api.together.xyz",
        }
    }

    /// Model used when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Ollama => "llama3.1:8b",
            Self::OpenAI => "gpt-4o-mini",
            Self::Anthropic => "claude-3-5-haiku-20241022",
            Self::Google => "gemini-1.5-flash",
            Self::Groq => "llama-3.1-8b-instant",
            Self::Together => "meta-llama/Meta-Llama-3.1-8B-Instruct-Turbo",
        }
    }

    /// Whether the vendor refuses requests without a credential.
    pub fn requires_key(&self) -> bool {
        !matches!(self, Self::Ollama)
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ollama" | "local" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "google" | "gemini" => Ok(Self::Google),
            "groq" => Ok(Self::Groq),
            "together" => Ok(Self::Together),
            _ => Err(ProviderError::Unsupported(name.to_owned())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration descriptor handed to the factory, resolved per request.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Provider name, matched case-insensitively against [`ProviderKind`].
    pub name: CompactString,
    /// API key. Never logged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Optional base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model identifier used for requests.
    pub default_model: CompactString,
}

impl ProviderConfig {
    /// Create a config for `name` with no credential or override.
    pub fn new(name: impl Into<CompactString>, default_model: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            api_key: None,
            base_url: None,
            default_model: default_model.into(),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Resolve the provider kind.
    pub fn kind(&self) -> Result<ProviderKind, ProviderError> {
        self.name.parse()
    }

    /// The API key, treating an empty string as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// The base URL without a trailing slash, falling back to the kind's default.
    pub fn base_url(&self, kind: ProviderKind) -> &str {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(kind.default_base_url())
            .trim_end_matches('/')
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("has_api_key", &self.api_key().is_some())
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}
