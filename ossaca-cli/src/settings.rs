//! User settings: `~/.config/ossaca/settings.toml`.
//!
//! ```toml
//! [storage]
//! database_path = "/srv/ossaca/ossaca_db.sqlite"
//!
//! [uploads]
//! directory = "/srv/ossaca/uploads"
//! ```
//!
//! Every path resolves through the same priority chain: CLI flag, then the
//! settings file, then a default relative to the current directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CliError;

pub(crate) const DEFAULT_DATABASE: &str = "ossaca_db.sqlite";
pub(crate) const DEFAULT_UPLOADS: &str = "uploads";

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("ossaca").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub storage: StorageSettings,
    pub uploads: UploadSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StorageSettings {
    pub database_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct UploadSettings {
    pub directory: Option<PathBuf>,
}

/// Where a resolved path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PathSource {
    Flag,
    SettingsFile,
    Default,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::Flag => write!(f, "command line"),
            PathSource::SettingsFile => write!(f, "settings file"),
            PathSource::Default => write!(f, "default"),
        }
    }
}

fn resolve(
    flag: Option<PathBuf>,
    configured: Option<&PathBuf>,
    default: &str,
) -> (PathBuf, PathSource) {
    if let Some(p) = flag {
        return (p, PathSource::Flag);
    }
    match configured {
        Some(p) if !p.as_os_str().is_empty() => (p.clone(), PathSource::SettingsFile),
        _ => (PathBuf::from(default), PathSource::Default),
    }
}

impl Settings {
    /// Load the settings file. A missing file gives the defaults.
    pub(crate) fn load() -> Result<Self, CliError> {
        Self::load_from(&settings_path())
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self, CliError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&contents)
            .map_err(|e| CliError::config(format!("Invalid {}: {}", path.display(), e)))
    }

    pub(crate) fn database_path(&self, flag: Option<PathBuf>) -> (PathBuf, PathSource) {
        resolve(flag, self.storage.database_path.as_ref(), DEFAULT_DATABASE)
    }

    pub(crate) fn uploads_dir(&self, flag: Option<PathBuf>) -> (PathBuf, PathSource) {
        resolve(flag, self.uploads.directory.as_ref(), DEFAULT_UPLOADS)
    }
}
