//! Shared application state.

use crate::GatewayConfig;
use anyhow::Result;
use llm::Client;
use search::SearchDispatcher;
use settings::{SettingsFile, SettingsStore};

/// State shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Runtime settings.
    pub settings: SettingsStore,
    /// Where settings are persisted, when enabled.
    pub file: Option<SettingsFile>,
    /// HTTP client shared by chat providers and model discovery.
    pub client: Client,
    /// Web search.
    pub search: SearchDispatcher,
    /// Whether chat streams end with a `{"type":"done"}` event.
    pub done_marker: bool,
}

impl AppState {
    /// Create state without persistence.
    pub fn new(settings: SettingsStore, client: Client, search: SearchDispatcher) -> Self {
        Self {
            settings,
            file: None,
            client,
            search,
            done_marker: false,
        }
    }

    /// Persist settings updates to `file`.
    pub fn with_settings_file(mut self, file: SettingsFile) -> Self {
        self.file = Some(file);
        self
    }

    /// Emit the trailing done event on chat streams.
    pub fn with_done_marker(mut self, done_marker: bool) -> Self {
        self.done_marker = done_marker;
        self
    }

    /// Build state from configuration and the process environment.
    ///
    /// When persistence is enabled, a stored settings file seeds the runtime
    /// tier. An unreadable file is logged and skipped.
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let client = provider::http_client(config.llm.connect_timeout(), config.llm.idle_timeout())?;
        let settings = SettingsStore::from_env();
        let search = SearchDispatcher::new(client.clone());
        let mut state = Self::new(settings, client, search).with_done_marker(config.chat.done_marker);

        if config.settings.persist {
            let file = match &config.settings.path {
                Some(path) => Some(SettingsFile::new(path)),
                None => SettingsFile::default_location(),
            };
            match file {
                Some(file) => {
                    match file.load() {
                        Ok(Some(stored)) => {
                            tracing::info!(path = %file.path().display(), "loaded stored settings");
                            state.settings.update(stored);
                        }
                        Ok(None) => {}
                        Err(e) => tracing::warn!("ignoring stored settings: {e:#}"),
                    }
                    state = state.with_settings_file(file);
                }
                None => tracing::warn!("no platform config directory, settings will not persist"),
            }
        }
        Ok(state)
    }
}
