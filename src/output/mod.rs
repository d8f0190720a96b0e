//! Output mode abstraction for robot and human output.

use std::path::Path;

use serde::Serialize;

use crate::backup::ExportReport;
use crate::cli::Cli;
use crate::config::ResolvedConfig;
use crate::error::StashError;
use crate::persist::LoadNotice;
use crate::query::{SearchResult, Statistics};
use crate::store::{AddOutcome, InventoryDatabase, Location, RoomRecord, StorageRemoval};

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

/// Build metadata shown by `stash version`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_sha: &'static str,
    pub git_dirty: bool,
    pub build_timestamp: &'static str,
    pub rustc_version: &'static str,
    pub target: &'static str,
}

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    /// JSON output for scripts.
    Robot(RobotFormat),
    /// Styled terminal output for human users.
    Human { quiet: bool },
}

impl OutputMode {
    /// Create OutputMode from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            Self::Human { quiet: cli.quiet }
        }
    }

    /// Returns true if output should be JSON.
    #[must_use]
    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// Convert into the appropriate Output implementation.
    #[must_use]
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human { quiet } => Box::new(HumanOutput::new(quiet)),
        }
    }
}

/// Trait for all output operations.
///
/// Commands call these methods without knowing the output mode.
pub trait Output {
    // Basic messages
    fn success(&self, message: &str);
    fn error(&self, error: &StashError);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);

    // Storage file
    fn load_notice(&self, notice: &LoadNotice);
    fn initialized(&self, path: &Path, created: bool);

    // Inventory operations
    fn items_added(&self, outcome: &AddOutcome);
    fn search_result(&self, term: &str, result: &SearchResult);
    fn inventory(&self, db: &InventoryDatabase);
    fn statistics(&self, stats: &Statistics);

    // Clearing
    fn all_cleared(&self, rooms_removed: usize);
    fn clear_cancelled(&self);
    fn room_cleared(&self, room: &str, removed: &RoomRecord);
    fn storage_cleared(&self, location: &Location, removal: &StorageRemoval);

    // Backup
    fn exported(&self, report: &ExportReport);

    // Settings
    fn config_info(&self, config: &ResolvedConfig);
    fn data_path_set(&self, path: &Path);

    // Metadata
    fn version_info(&self, info: &VersionInfo);
}

/// Number of items held by a room.
pub(crate) fn room_item_count(record: &RoomRecord) -> usize {
    record.values().map(Vec::len).sum()
}
