//! JSON file persistence for the inventory.
//!
//! The file is rewritten in place on every save. A missing file is created
//! empty; an unreadable or malformed file is replaced with an empty store
//! rather than failing the load.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, StashError};
use crate::store::InventoryDatabase;

/// Default file name for the inventory store.
pub const DEFAULT_FILE_NAME: &str = "storage_data.json";

/// Serialize a database in the on-disk format.
///
/// Four-space indentation, non-ASCII written as-is, no trailing newline.
pub fn to_json(db: &InventoryDatabase) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    db.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| StashError::Other(format!("Serializer produced invalid UTF-8: {e}")))
}

/// Something `load` had to do besides a plain read.
#[derive(Debug)]
pub enum LoadNotice {
    /// No file existed; an empty one was created.
    Created,
    /// The file could not be parsed and was reset to an empty store.
    CorruptRecovered { reason: String },
    /// The file could not be read; an empty in-memory store is returned
    /// and the file is left as it was.
    ReadFailed(StashError),
}

impl LoadNotice {
    /// True for notices the user should see as a warning.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        !matches!(self, Self::Created)
    }

    /// User-facing description.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Created => "Created a new empty inventory file".to_string(),
            Self::CorruptRecovered { reason } => {
                format!("Inventory file was corrupt ({reason}); it has been reset to an empty store")
            }
            Self::ReadFailed(err) => format!("Could not read inventory file: {err}"),
        }
    }
}

/// Database returned by [`InventoryFile::load`].
#[derive(Debug)]
pub struct Loaded {
    pub db: InventoryDatabase,
    pub notice: Option<LoadNotice>,
}

/// The inventory file at a configured path.
#[derive(Debug, Clone)]
pub struct InventoryFile {
    path: PathBuf,
}

impl InventoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path used by every subsequent read and write.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Point this handle at a different file.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
        info!(path = %self.path.display(), "Inventory file path changed");
    }

    /// Create the file with an empty store if it does not exist.
    ///
    /// Returns true when a file was created.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.write(&InventoryDatabase::new())?;
        info!(path = %self.path.display(), "Created empty inventory file");
        Ok(true)
    }

    /// Read the store, recovering instead of failing.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Loaded {
        let created = match self.ensure_exists() {
            Ok(created) => created,
            Err(err) => {
                info!(error = %err, "Inventory file could not be created");
                return Loaded {
                    db: InventoryDatabase::new(),
                    notice: Some(LoadNotice::ReadFailed(err)),
                };
            }
        };

        let parsed = fs::read(&self.path).and_then(|bytes| {
            serde_json::from_slice::<InventoryDatabase>(&bytes)
                .map_err(|e| io::Error::new(ErrorKind::InvalidData, e))
        });

        match parsed {
            Ok(mut db) => {
                let dropped = db.drop_empty_containers();
                if dropped > 0 {
                    info!(dropped, "Ignored empty rooms and storages");
                }
                debug!(rooms = db.room_count(), "Inventory loaded");
                Loaded {
                    db,
                    notice: created.then_some(LoadNotice::Created),
                }
            }
            Err(e) if matches!(e.kind(), ErrorKind::InvalidData | ErrorKind::NotFound) => {
                let reason = e.to_string();
                info!(reason = %reason, "Inventory file is corrupt, resetting");
                if let Err(err) = self.write(&InventoryDatabase::new()) {
                    warn!(error = %err, "Failed to rewrite corrupt inventory file");
                }
                Loaded {
                    db: InventoryDatabase::new(),
                    notice: Some(LoadNotice::CorruptRecovered { reason }),
                }
            }
            Err(e) => {
                info!(error = %e, "Inventory file could not be read");
                Loaded {
                    db: InventoryDatabase::new(),
                    notice: Some(LoadNotice::ReadFailed(StashError::FileRead {
                        path: self.path.display().to_string(),
                        reason: e.to_string(),
                    })),
                }
            }
        }
    }

    /// Overwrite the file with `db`.
    #[instrument(skip(self, db), fields(path = %self.path.display(), rooms = db.room_count()))]
    pub fn save(&self, db: &InventoryDatabase) -> Result<()> {
        self.write(db)?;
        debug!("Inventory saved");
        Ok(())
    }

    fn write(&self, db: &InventoryDatabase) -> Result<()> {
        write_json(&self.path, db).map(|_| ())
    }
}

/// Write `db` to `path` in the on-disk format, creating parent directories.
///
/// Returns the number of bytes written.
pub(crate) fn write_json(path: &Path, db: &InventoryDatabase) -> Result<usize> {
    let file_error = |e: io::Error| StashError::FileWrite {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(file_error)?;
    }
    let json = to_json(db)?;
    fs::write(path, &json).map_err(file_error)?;
    Ok(json.len())
}
