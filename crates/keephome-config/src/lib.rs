//! Durable settings storage for the KeepHome companion.
//!
//! One TOML file holds the six persisted entries; figment layers
//! `KEEPHOME_`-prefixed environment variables on top at load time.
//! The file's keys are the storage contract (`sync_notifications`,
//! `notification_interval`, `ap_mode`, `ssid`, `password`, `ip`) and
//! must never be renamed across versions.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use thiserror::Error;
use tracing::warn;

use keephome_core::Settings;
use keephome_core::store::{BackendResult, SettingsBackend};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize settings: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("settings loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings file path ──────────────────────────────────────────────

/// Resolve the settings file path via XDG / platform conventions.
pub fn settings_path() -> PathBuf {
    ProjectDirs::from("net", "anderserver", "keephome").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("settings.toml");
            p
        },
        |dirs| dirs.config_dir().join("settings.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("keephome");
    p
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load settings from the given file plus environment overrides.
///
/// Layering: defaults, then the TOML file, then `KEEPHOME_*` env vars.
/// A missing or partial file simply leaves the defaults in place.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("KEEPHOME_"));

    let settings: Settings = figment.extract()?;
    Ok(settings)
}

/// Serialize settings to pretty TOML and write them to `path`,
/// creating parent directories as needed.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(settings)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Backend implementation ──────────────────────────────────────────

/// File-backed [`SettingsBackend`] over [`load_settings`] /
/// [`save_settings`].
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Backend over an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend over the platform-conventional settings path.
    pub fn at_default_path() -> Self {
        Self::new(settings_path())
    }

    /// The file this backend reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsBackend for FileBackend {
    fn load(&self) -> Option<Settings> {
        match load_settings(&self.path) {
            Ok(settings) => Some(settings),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to load settings");
                None
            }
        }
    }

    fn save(&self, settings: &Settings) -> BackendResult {
        save_settings(&self.path, settings)?;
        Ok(())
    }
}
