//! Gateway configuration loaded from TOML.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Top-level gateway configuration. Every section is optional.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Server bind configuration.
    pub server: ServerConfig,
    /// HTTP client limits for vendor calls.
    pub llm: LlmConfig,
    /// Chat streaming behavior.
    pub chat: ChatConfig,
    /// Settings persistence.
    pub settings: SettingsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_owned(),
        }
    }
}

/// Timeouts applied to every vendor request.
///
/// No total request timeout is applied, since an answer may stream for
/// minutes; `idle_timeout_secs` bounds the gap between two reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Connection establishment timeout.
    pub connect_timeout_secs: u64,
    /// Maximum silence between two reads of a response.
    pub idle_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            idle_timeout_secs: 120,
        }
    }
}

impl LlmConfig {
    /// The connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// The read timeout.
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Chat streaming configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Emit a trailing `{"type":"done"}` event after the last chunk.
    pub done_marker: bool,
}

/// Settings persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Load settings at start-up and save them on every update.
    pub persist: bool,
    /// Settings file path. Defaults to the platform config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            persist: true,
            path: None,
        }
    }
}

impl GatewayConfig {
    /// Parse a TOML string, expanding `${ENV_VAR}` patterns first.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = crate::utils::expand_env_vars(toml_str);
        let config: Self = toml::from_str(&expanded).context("invalid gateway config")?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// The address to listen on.
    pub fn bind_address(&self) -> &str {
        &self.server.bind
    }
}
