//! `SettingsStore`: process-wide settings with snapshot reads.

use crate::AppSettings;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared settings state.
///
/// Readers get an `Arc` snapshot and never hold the lock while doing I/O.
/// Writers replace the whole snapshot; concurrent updates resolve as last
/// write wins, and a request keeps the snapshot it resolved even if another
/// request updates the store meanwhile.
#[derive(Clone)]
pub struct SettingsStore {
    inner: Arc<Inner>,
}

struct Inner {
    /// Environment-derived defaults, fixed at construction.
    defaults: Arc<AppSettings>,
    /// Last settings applied during the process lifetime.
    runtime: RwLock<Option<Arc<AppSettings>>>,
}

impl SettingsStore {
    /// Create a store over the given environment tier.
    pub fn new(defaults: AppSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                defaults: Arc::new(defaults),
                runtime: RwLock::new(None),
            }),
        }
    }

    /// Create a store over the process environment.
    pub fn from_env() -> Self {
        Self::new(AppSettings::from_env())
    }

    /// The environment-derived defaults.
    pub fn defaults(&self) -> Arc<AppSettings> {
        self.inner.defaults.clone()
    }

    /// The effective settings absent any request override.
    pub fn current(&self) -> Arc<AppSettings> {
        self.inner
            .runtime
            .read()
            .clone()
            .unwrap_or_else(|| self.inner.defaults.clone())
    }

    /// Replace the runtime tier.
    pub fn update(&self, settings: AppSettings) -> Arc<AppSettings> {
        tracing::info!(
            provider = %settings.llm_provider,
            engine = %settings.search_engine,
            has_api_key = !settings.llm_api_key.is_empty(),
            "settings updated"
        );
        let settings = Arc::new(settings);
        *self.inner.runtime.write() = Some(settings.clone());
        settings
    }

    /// Apply a JSON-encoded override, replacing the runtime tier.
    ///
    /// Malformed payloads are logged and ignored. A secret sent as the mask
    /// keeps its current value. Returns the applied settings, if any.
    pub fn apply_override(&self, raw: &str) -> Option<Arc<AppSettings>> {
        match serde_json::from_str::<AppSettings>(raw) {
            Ok(settings) => Some(self.update(settings.restore_masked(&self.current()))),
            Err(e) => {
                tracing::warn!("ignoring malformed settings override: {e}");
                None
            }
        }
    }

    /// Resolve the effective settings for one request.
    ///
    /// A well-formed override wins and is kept as the runtime tier; otherwise
    /// resolution falls through to [`SettingsStore::current`].
    pub fn resolve(&self, raw_override: Option<&str>) -> Arc<AppSettings> {
        raw_override
            .and_then(|raw| self.apply_override(raw))
            .unwrap_or_else(|| self.current())
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("current", &self.current())
            .finish()
    }
}
