//! Persistent user settings.
//!
//! Stored as TOML:
//!
//! ```toml
//! data_file = "/home/me/inventory.json"
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::path::{default_data_file, resolve_path};
use crate::error::{Result, StashError};

/// User settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Configured inventory file. `None` means the built-in default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`. A missing file yields defaults.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(StashError::FileRead {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                });
            }
        };
        toml::from_str(&contents)
            .map_err(|e| StashError::ConfigParse(format!("{}: {e}", path.display())))
    }

    /// Load settings that are about to be rewritten.
    ///
    /// A file that no longer parses is replaced by defaults instead of
    /// failing, so `config reset` can repair it.
    pub fn load_for_rewrite(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(StashError::ConfigParse(reason)) => {
                warn!(%reason, "Discarding unparseable settings file");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Write settings to `path`, creating parent directories.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn save(&self, path: &Path) -> Result<()> {
        let file_error = |e: std::io::Error| StashError::FileWrite {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(file_error)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| StashError::ConfigInvalid(e.to_string()))?;
        fs::write(path, contents).map_err(file_error)?;
        info!("Settings saved");
        Ok(())
    }

    /// Resolve the inventory file this configuration points at.
    ///
    /// A relative `data_file` is taken relative to the settings file.
    pub fn data_file(&self, settings_path: &Path) -> Result<PathBuf> {
        match &self.data_file {
            Some(configured) => {
                let base = settings_path.parent().unwrap_or_else(|| Path::new("."));
                resolve_path(configured, base)
            }
            None => default_data_file(),
        }
    }
}

/// Where the data file path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFileSource {
    /// `--data-file` or `STASH_DATA_FILE`.
    Override,
    /// `data_file` in the settings file.
    Settings,
    /// Built-in default location.
    Default,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub settings_path: PathBuf,
    pub settings: Settings,
    pub data_file: PathBuf,
    pub source: DataFileSource,
}

impl ResolvedConfig {
    /// Combine an optional override with the settings stored at `settings_path`.
    #[instrument(skip_all)]
    pub fn resolve(settings_path: PathBuf, data_file_override: Option<PathBuf>) -> Result<Self> {
        let settings = Settings::load(&settings_path)?;
        Self::with_settings(settings_path, settings, data_file_override)
    }

    /// Combine an optional override with already loaded settings.
    pub fn with_settings(
        settings_path: PathBuf,
        settings: Settings,
        data_file_override: Option<PathBuf>,
    ) -> Result<Self> {
        let (data_file, source) = match data_file_override {
            Some(path) => (path, DataFileSource::Override),
            None if settings.data_file.is_some() => {
                (settings.data_file(&settings_path)?, DataFileSource::Settings)
            }
            None => (default_data_file()?, DataFileSource::Default),
        };
        debug!(
            data_file = %data_file.display(),
            source = ?source,
            "Resolved inventory file"
        );
        Ok(Self {
            settings_path,
            settings,
            data_file,
            source,
        })
    }
}
