//! The settings object and its environment tier.

use provider::{ProviderConfig, ProviderKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder substituted for secrets in client-facing responses.
pub const MASK: &str = "***";

/// Provider used when `LLM_PROVIDER` is unset.
const DEFAULT_PROVIDER: &str = "ollama";

/// Search engine used when `SEARCH_ENGINE` is unset.
const DEFAULT_SEARCH_ENGINE: &str = "duckduckgo";

/// Education level used when `DEFAULT_EDUCATION_LEVEL` is unset.
const DEFAULT_EDUCATION_LEVEL: &str = "Middle School";

/// The complete application settings.
///
/// Every field is required when deserializing, so a partial object is
/// rejected as malformed rather than merged.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Chat provider name, matched case-insensitively.
    pub llm_provider: String,
    /// Chat provider credential. Empty when unset.
    pub llm_api_key: String,
    /// Chat provider base URL. Empty means the vendor default.
    pub llm_base_url: String,
    /// Model identifier.
    pub llm_model: String,
    /// Search engine name, matched case-insensitively.
    pub search_engine: String,
    /// Search engine credential (Bing, Serper). Empty when unset.
    pub search_api_key: String,
    /// Base URL of a SearxNG server.
    pub search_url: String,
    /// Education level the tutor prompt targets.
    pub default_education_level: String,
}

impl AppSettings {
    /// Derive the lowest tier from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Derive the lowest tier from `lookup`, falling back to hardcoded
    /// literals for anything unset or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_provider = var("LLM_PROVIDER").unwrap_or_else(|| DEFAULT_PROVIDER.to_owned());
        let (llm_api_key, llm_base_url, llm_model) = match llm_provider.parse::<ProviderKind>() {
            Ok(kind) => {
                let prefix = kind.env_prefix();
                (
                    var(&format!("{prefix}_API_KEY")).unwrap_or_default(),
                    var(&format!("{prefix}_BASE_URL"))
                        .unwrap_or_else(|| kind.default_base_url().to_owned()),
                    var(&format!("{prefix}_MODEL"))
                        .unwrap_or_else(|| kind.default_model().to_owned()),
                )
            }
            Err(_) => {
                tracing::warn!(provider = %llm_provider, "unknown LLM_PROVIDER, leaving endpoint unset");
                Default::default()
            }
        };

        let search_engine = var("SEARCH_ENGINE").unwrap_or_else(|| DEFAULT_SEARCH_ENGINE.to_owned());
        let search_api_key = match search_engine.to_ascii_lowercase().as_str() {
            "serper" => var("SERPER_API_KEY"),
            "bing" => var("BING_API_KEY"),
            _ => None,
        }
        .unwrap_or_default();

        Self {
            llm_provider,
            llm_api_key,
            llm_base_url,
            llm_model,
            search_engine,
            search_api_key,
            search_url: var("SEARXNG_URL").unwrap_or_default(),
            default_education_level: var("DEFAULT_EDUCATION_LEVEL")
                .unwrap_or_else(|| DEFAULT_EDUCATION_LEVEL.to_owned()),
        }
    }

    /// The provider descriptor for the chat factory.
    pub fn provider_config(&self) -> ProviderConfig {
        let mut config = ProviderConfig::new(self.llm_provider.as_str(), self.llm_model.as_str());
        if !self.llm_api_key.is_empty() {
            config = config.with_api_key(self.llm_api_key.clone());
        }
        if !self.llm_base_url.is_empty() {
            config = config.with_base_url(self.llm_base_url.clone());
        }
        config
    }

    /// A copy safe to hand to a client: non-empty secrets become [`MASK`].
    pub fn masked(&self) -> Self {
        let mask = |secret: &str| {
            if secret.is_empty() {
                String::new()
            } else {
                MASK.to_owned()
            }
        };
        Self {
            llm_api_key: mask(&self.llm_api_key),
            search_api_key: mask(&self.search_api_key),
            ..self.clone()
        }
    }

    /// Replace secrets a client posted back as [`MASK`] with the ones in
    /// `previous`.
    pub fn restore_masked(mut self, previous: &Self) -> Self {
        if self.llm_api_key == MASK {
            self.llm_api_key = previous.llm_api_key.clone();
        }
        if self.search_api_key == MASK {
            self.search_api_key = previous.search_api_key.clone();
        }
        self
    }
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("llm_provider", &self.llm_provider)
            .field("has_llm_api_key", &!self.llm_api_key.is_empty())
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_model", &self.llm_model)
            .field("search_engine", &self.search_engine)
            .field("has_search_api_key", &!self.search_api_key.is_empty())
            .field("search_url", &self.search_url)
            .field("default_education_level", &self.default_education_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::AppSettings;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn hardcoded_defaults() {
        let settings = AppSettings::from_lookup(lookup(&[]));
        assert_eq!(settings.llm_provider, "ollama");
        assert_eq!(settings.llm_base_url, "http://localhost:11434");
        assert_eq!(settings.llm_model, "llama3.1:8b");
        assert_eq!(settings.search_engine, "duckduckgo");
        assert_eq!(settings.default_education_level, "Middle School");
        assert!(settings.llm_api_key.is_empty());
    }

    #[test]
    fn provider_prefix_selects_variables() {
        let settings = AppSettings::from_lookup(lookup(&[
            ("LLM_PROVIDER", "Claude"),
            ("ANTHROPIC_API_KEY", "sk-ant"),
            ("OPENAI_API_KEY", "sk-oai"),
            ("ANTHROPIC_MODEL", "claude-3-opus-20240229"),
        ]));
        assert_eq!(settings.llm_api_key, "sk-ant");
        assert_eq!(settings.llm_base_url, "https://api.anthropic.com");
        assert_eq!(settings.llm_model, "claude-3-opus-20240229");
    }

    #[test]
    fn search_key_follows_engine() {
        let settings = AppSettings::from_lookup(lookup(&[
            ("SEARCH_ENGINE", "serper"),
            ("SERPER_API_KEY", "serp"),
            ("BING_API_KEY", "bing"),
        ]));
        assert_eq!(settings.search_api_key, "serp");

        let settings = AppSettings::from_lookup(lookup(&[
            ("SEARCH_ENGINE", "searxng"),
            ("SEARXNG_URL", "http://searx.local"),
            ("BING_API_KEY", "bing"),
        ]));
        assert!(settings.search_api_key.is_empty());
        assert_eq!(settings.search_url, "http://searx.local");
    }

    #[test]
    fn unknown_provider_keeps_name() {
        let settings = AppSettings::from_lookup(lookup(&[("LLM_PROVIDER", "mistral")]));
        assert_eq!(settings.llm_provider, "mistral");
        assert!(settings.llm_base_url.is_empty());
        assert!(settings.provider_config().kind().is_err());
    }

    #[test]
    fn masking_hides_only_present_secrets() {
        let mut settings = AppSettings::from_lookup(lookup(&[]));
        settings.llm_api_key = "sk-live".into();
        let masked = settings.masked();
        assert_eq!(masked.llm_api_key, "***");
        assert_eq!(masked.search_api_key, "");
        assert_eq!(masked.llm_model, settings.llm_model);
        assert!(!format!("{settings:?}").contains("sk-live"));
    }

    #[test]
    fn posted_mask_keeps_previous_secret() {
        let mut previous = AppSettings::from_lookup(lookup(&[]));
        previous.llm_api_key = "sk-live".into();
        let posted = previous.masked();
        let restored = posted.restore_masked(&previous);
        assert_eq!(restored, previous);
    }

    #[test]
    fn provider_config_omits_empty_fields() {
        let mut settings = AppSettings::from_lookup(lookup(&[]));
        settings.llm_base_url.clear();
        let config = settings.provider_config();
        assert!(config.api_key.is_none());
        assert!(config.base_url.is_none());
        assert_eq!(config.default_model, "llama3.1:8b");
    }
}
