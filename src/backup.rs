//! Snapshot export of the inventory to an arbitrary file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::Result;
use crate::persist::write_json;
use crate::query::compute_statistics;
use crate::store::InventoryDatabase;

/// Summary of a finished export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub room_count: usize,
    pub item_count: usize,
    pub bytes: usize,
}

/// Write `db`, unchanged, to `destination`.
///
/// Uses the same format as the inventory file so an export can be pointed
/// at directly with `config set-path`.
#[instrument(skip(db), fields(destination = %destination.display()))]
pub fn export_to(db: &InventoryDatabase, destination: &Path) -> Result<ExportReport> {
    let bytes = write_json(destination, db)?;
    let stats = compute_statistics(db);
    info!(bytes, rooms = stats.room_count, "Inventory exported");

    Ok(ExportReport {
        path: destination.to_path_buf(),
        room_count: stats.room_count,
        item_count: stats.total_item_count,
        bytes,
    })
}

/// File name for an export taken at `now`.
pub fn default_backup_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("stash-backup-{}.json", now.format("%Y%m%d-%H%M%S"))
}
