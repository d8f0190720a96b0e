//! Robot mode JSON output implementation.
//!
//! Every command prints exactly one JSON document to stdout. Errors and
//! warnings go to stderr so stdout always parses.

use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, instrument, trace};

use crate::backup::ExportReport;
use crate::config::ResolvedConfig;
use crate::error::StashError;
use crate::persist::LoadNotice;
use crate::query::{SearchResult, Statistics};
use crate::store::{AddOutcome, InventoryDatabase, Location, RoomRecord, StorageRemoval};

use super::{Output, RobotFormat, VersionInfo, room_item_count};

/// JSON output implementation for scripting.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    fn render<T: Serialize + ?Sized>(&self, data: &T) -> String {
        let rendered = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        rendered.unwrap_or_else(|e| {
            json!({ "error": true, "kind": "serialize", "message": e.to_string() }).to_string()
        })
    }

    /// Output any serializable data as JSON to stdout.
    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        let json = self.render(data);
        trace!(json_len = json.len(), "JSON serialized");
        println!("{json}");
    }

    /// Output JSON to stderr.
    fn output_json_stderr<T: Serialize + ?Sized>(&self, data: &T) {
        eprintln!("{}", self.render(data));
    }
}

// === Payload builders ===

pub(crate) fn error_payload(error: &StashError) -> Value {
    json!({
        "error": true,
        "kind": error.kind(),
        "message": error.to_string(),
        "suggestion": error.suggestion(),
        "recoverable": error.is_user_recoverable(),
    })
}

pub(crate) fn load_notice_payload(notice: &LoadNotice) -> Value {
    let kind = match notice {
        LoadNotice::Created => "created",
        LoadNotice::CorruptRecovered { .. } => "corrupt_recovered",
        LoadNotice::ReadFailed(_) => "read_failed",
    };
    json!({
        "warning": notice.is_warning(),
        "kind": kind,
        "message": notice.message(),
    })
}

pub(crate) fn search_payload(term: &str, result: &SearchResult) -> Value {
    match result {
        SearchResult::First(location) => json!({
            "item": term,
            "mode": "first",
            "found": location.is_some(),
            "location": location,
        }),
        SearchResult::All(matches) => json!({
            "item": term,
            "mode": "all",
            "found": !matches.is_empty(),
            "matches": matches,
        }),
    }
}

pub(crate) fn statistics_payload(stats: &Statistics) -> Value {
    json!({
        "has_data": stats.has_data(),
        "room_count": stats.room_count,
        "storage_count": stats.storage_count(),
        "total_item_count": stats.total_item_count,
        "per_room": stats.per_room,
    })
}

impl Output for RobotOutput {
    fn success(&self, message: &str) {
        self.output_json(&json!({ "success": true, "message": message }));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &StashError) {
        debug!(error = %error, "Robot: error");
        self.output_json_stderr(&error_payload(error));
    }

    fn warning(&self, message: &str) {
        self.output_json_stderr(&json!({ "warning": true, "message": message }));
    }

    fn info(&self, message: &str) {
        self.output_json_stderr(&json!({ "info": true, "message": message }));
    }

    fn load_notice(&self, notice: &LoadNotice) {
        if notice.is_warning() {
            self.output_json_stderr(&load_notice_payload(notice));
        }
    }

    fn initialized(&self, path: &Path, created: bool) {
        self.output_json(&json!({
            "data_file": path.display().to_string(),
            "created": created,
            "ok": true,
        }));
    }

    #[instrument(skip(self, outcome), fields(room = %outcome.room, storage = %outcome.storage))]
    fn items_added(&self, outcome: &AddOutcome) {
        debug!("Robot: items_added");
        self.output_json(&json!({
            "ok": !outcome.skipped,
            "room": outcome.room,
            "storage": outcome.storage,
            "added": outcome.added,
            "duplicates": outcome.duplicates,
            "skipped": outcome.skipped,
        }));
    }

    fn search_result(&self, term: &str, result: &SearchResult) {
        self.output_json(&search_payload(term, result));
    }

    fn inventory(&self, db: &InventoryDatabase) {
        self.output_json(db);
    }

    fn statistics(&self, stats: &Statistics) {
        self.output_json(&statistics_payload(stats));
    }

    fn all_cleared(&self, rooms_removed: usize) {
        self.output_json(&json!({
            "cleared": "all",
            "rooms_removed": rooms_removed,
            "ok": true,
        }));
    }

    fn clear_cancelled(&self) {
        self.output_json(&json!({ "cleared": false, "ok": false }));
    }

    fn room_cleared(&self, room: &str, removed: &RoomRecord) {
        self.output_json(&json!({
            "cleared": "room",
            "room": room,
            "storages_removed": removed.len(),
            "items_removed": room_item_count(removed),
            "ok": true,
        }));
    }

    fn storage_cleared(&self, location: &Location, removal: &StorageRemoval) {
        self.output_json(&json!({
            "cleared": "storage",
            "room": location.room,
            "storage": location.storage,
            "items_removed": removal.items.len(),
            "room_removed": removal.room_removed,
            "ok": true,
        }));
    }

    fn exported(&self, report: &ExportReport) {
        self.output_json(&json!({
            "exported": report.path.display().to_string(),
            "room_count": report.room_count,
            "item_count": report.item_count,
            "bytes": report.bytes,
            "ok": true,
        }));
    }

    fn config_info(&self, config: &ResolvedConfig) {
        self.output_json(&json!({
            "settings_file": config.settings_path.display().to_string(),
            "data_file": config.data_file.display().to_string(),
            "source": config.source,
            "settings": config.settings,
        }));
    }

    fn data_path_set(&self, path: &Path) {
        self.output_json(&json!({ "data_file": path.display().to_string(), "ok": true }));
    }

    fn version_info(&self, info: &VersionInfo) {
        self.output_json(info);
    }
}
