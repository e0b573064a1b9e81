//! On-disk settings persistence.

use crate::AppSettings;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Config directory name under the platform config dir.
pub const CONFIG_DIR: &str = "studybuddy";

/// Settings file name.
pub const SETTINGS_FILE: &str = "study-buddy-settings.json";

/// A JSON settings file.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    /// A settings file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The platform default (`~/.config/studybuddy/study-buddy-settings.json`
    /// on linux), if the platform has a config directory.
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join(CONFIG_DIR).join(SETTINGS_FILE)))
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored settings. A missing file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<AppSettings>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read {}", self.path.display()));
            }
        };
        let settings = serde_json::from_str(&raw)
            .with_context(|| format!("invalid settings file {}", self.path.display()))?;
        Ok(Some(settings))
    }

    /// Write `settings`, creating parent directories as needed.
    pub fn save(&self, settings: &AppSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}
