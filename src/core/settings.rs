//! Persistence of the webhook settings in ~/.config/allsmart-chat/settings.json.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::paths;

/// What the configuration dialog and `config` subcommands persist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    pub use_cors_proxy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("No config directory available")]
    NoConfigDir,
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Settings file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn settings_path() -> Result<PathBuf, SettingsError> {
    paths::settings_file().ok_or(SettingsError::NoConfigDir)
}

/// Load settings from the config directory. A missing file gives the defaults.
pub fn load() -> Result<Settings, SettingsError> {
    match paths::settings_file() {
        Some(path) => load_from(&path),
        None => Ok(Settings::default()),
    }
}

/// Save settings to the config directory; returns the file written.
pub fn save(settings: &Settings) -> Result<PathBuf, SettingsError> {
    let path = settings_path()?;
    save_to(&path, settings)?;
    Ok(path)
}

/// Remove the settings file. Returns whether a file was removed.
pub fn reset() -> Result<bool, SettingsError> {
    let path = settings_path()?;
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(SettingsError::Io { path, source }),
    }
}

pub fn load_from(path: &Path) -> Result<Settings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_json::from_str(&content).map_err(|source| SettingsError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write settings, creating the parent directory if needed.
pub fn save_to(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let io_err = |source: io::Error| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json + "\n").map_err(io_err)
}
