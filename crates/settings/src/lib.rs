//! Runtime settings for studybuddy.
//!
//! Effective settings are resolved from three tiers, highest first: an
//! override carried by the current request, the last settings applied during
//! the process lifetime, and defaults derived from the environment. Every
//! write replaces the whole object; nothing is merged field by field.

pub use {
    app::{AppSettings, MASK},
    file::SettingsFile,
    store::SettingsStore,
};

mod app;
mod file;
mod store;
