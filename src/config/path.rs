//! Path resolution for configured file locations.
//!
//! Supports absolute paths, paths relative to a base directory, and "~" home
//! directory expansion.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Result, StashError};
use crate::persist::DEFAULT_FILE_NAME;

/// Application directory name under the platform config/data dirs.
pub const APP_DIR: &str = "stash";

/// Resolve a configured path.
///
/// Resolution rules:
/// 1. Paths starting with `~`: expanded to home directory
/// 2. Absolute paths: used as-is
/// 3. Relative paths: resolved against `base_dir`
pub fn resolve_path(path: &Path, base_dir: &Path) -> Result<PathBuf> {
    trace!(
        path = %path.display(),
        base_dir = %base_dir.display(),
        "Resolving path"
    );

    let path_str = path.to_string_lossy();

    // Home directory expansion
    if path_str == "~" || path_str.starts_with("~/") {
        let home = home_dir()?;
        let rest = path_str.strip_prefix("~/").unwrap_or("");
        let resolved = if rest.is_empty() {
            home
        } else {
            home.join(rest)
        };
        debug!(
            original = %path.display(),
            resolved = %resolved.display(),
            "Expanded home directory path"
        );
        return Ok(resolved);
    }

    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let resolved = base_dir.join(path);
    debug!(
        original = %path.display(),
        resolved = %resolved.display(),
        "Resolved relative path"
    );
    Ok(resolved)
}

/// Resolve a path typed on the command line (relative to the working directory).
pub fn resolve_cli_path(path: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| {
        StashError::ConfigInvalid(format!("Could not determine working directory: {e}"))
    })?;
    resolve_path(path, &cwd)
}

/// Resolve the user's home directory (cross-platform).
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        StashError::ConfigInvalid("Could not determine home directory".to_string())
    })
}

/// Default settings file: `<config_dir>/stash/config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join("config.toml"))
        .ok_or_else(|| {
            StashError::ConfigInvalid("Could not determine config directory".to_string())
        })
}

/// Default inventory file: next to the executable, falling back to
/// `<data_dir>/stash/` when the executable location is unknown.
pub fn default_data_file() -> Result<PathBuf> {
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        return Ok(dir.join(DEFAULT_FILE_NAME));
    }

    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(DEFAULT_FILE_NAME))
        .ok_or_else(|| StashError::ConfigInvalid("Could not determine data directory".to_string()))
}
