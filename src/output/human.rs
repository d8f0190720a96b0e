//! Human-friendly output implementation using console styles.

use std::fmt::Write as _;
use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::backup::ExportReport;
use crate::config::{DataFileSource, ResolvedConfig};
use crate::error::StashError;
use crate::persist::LoadNotice;
use crate::query::{SearchResult, Statistics};
use crate::store::{AddOutcome, InventoryDatabase, Location, RoomRecord, StorageRemoval};
use crate::theme::StashTheme;

use super::{Output, VersionInfo, room_item_count};

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    theme: StashTheme,
    quiet: bool,
}

impl HumanOutput {
    #[instrument]
    pub fn new(quiet: bool) -> Self {
        debug!("Creating HumanOutput");
        Self {
            theme: StashTheme::default(),
            quiet,
        }
    }

    /// Room → storage → item tree.
    pub(crate) fn render_tree(&self, db: &InventoryDatabase) -> String {
        let mut out = String::new();
        for (room, record) in db.rooms() {
            let _ = writeln!(out, "{}", self.theme.room.apply_to(room));
            for (storage, items) in record {
                let _ = writeln!(
                    out,
                    "  {} {}",
                    self.theme.storage.apply_to(storage),
                    self.theme.muted.apply_to(format!("({})", items.len()))
                );
                for item in items {
                    let _ = writeln!(out, "    - {}", self.theme.item.apply_to(item));
                }
            }
        }
        out
    }

    pub(crate) fn render_statistics(&self, stats: &Statistics) -> String {
        if !stats.has_data() {
            return "No data yet. Add items with: stash add <ROOM> <STORAGE> <ITEMS>\n".to_string();
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {}",
            self.theme.label.apply_to("Rooms:"),
            self.theme.count.apply_to(stats.room_count)
        );
        let _ = writeln!(
            out,
            "{} {}",
            self.theme.label.apply_to("Items:"),
            self.theme.count.apply_to(stats.total_item_count)
        );
        out.push('\n');
        for (room, storages) in &stats.per_room {
            let total: usize = storages.values().sum();
            let _ = writeln!(out, "{} ({total})", self.theme.room.apply_to(room));
            for (storage, count) in storages {
                let _ = writeln!(out, "  {}: {count}", self.theme.storage.apply_to(storage));
            }
        }
        out
    }

    pub(crate) fn render_added(outcome: &AddOutcome) -> String {
        let location = Location::new(outcome.room.as_str(), outcome.storage.as_str());
        if outcome.skipped {
            return format!(
                "Already stored in {location}: {}. Nothing was added.",
                outcome.duplicates.join(", ")
            );
        }
        let mut message = format!(
            "Added {} item{} to {location}: {}",
            outcome.added.len(),
            if outcome.added.len() == 1 { "" } else { "s" },
            outcome.added.join(", ")
        );
        if !outcome.duplicates.is_empty() {
            let _ = write!(message, " (already present: {})", outcome.duplicates.join(", "));
        }
        message
    }

    fn print_block(block: &str) {
        print!("{block}");
    }
}

impl Output for HumanOutput {
    fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        println!("{} {message}", self.theme.success.apply_to("[OK]"));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &StashError) {
        debug!(
            error = %error,
            recoverable = error.is_user_recoverable(),
            "Outputting error"
        );
        eprintln!("{} {error}", self.theme.error.apply_to("[ERR]"));
        if let Some(suggestion) = error.suggestion() {
            trace!(suggestion, "Adding suggestion");
            eprintln!("{} {suggestion}", self.theme.muted.apply_to("Hint:"));
        }
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {message}", self.theme.warning.apply_to("[WARN]"));
    }

    fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        println!("{} {message}", self.theme.accent.apply_to("[INFO]"));
    }

    fn load_notice(&self, notice: &LoadNotice) {
        if notice.is_warning() {
            self.warning(&notice.message());
        }
    }

    fn initialized(&self, path: &Path, created: bool) {
        if created {
            self.success(&format!("Created {}", path.display()));
        } else {
            self.info(&format!("{} already exists", path.display()));
        }
    }

    fn items_added(&self, outcome: &AddOutcome) {
        let message = Self::render_added(outcome);
        if outcome.skipped {
            self.warning(&message);
        } else {
            self.success(&message);
        }
    }

    fn search_result(&self, term: &str, result: &SearchResult) {
        match result {
            SearchResult::First(Some(location)) => {
                println!(
                    "{} is in {} / {}",
                    self.theme.item.apply_to(term),
                    self.theme.room.apply_to(&location.room),
                    self.theme.storage.apply_to(&location.storage)
                );
            }
            SearchResult::All(matches) if !matches.is_empty() => {
                Self::print_block(&self.render_tree(matches));
            }
            _ => self.warning(&format!("No item named \"{term}\" was found")),
        }
    }

    fn inventory(&self, db: &InventoryDatabase) {
        if db.is_empty() {
            self.info("The inventory is empty");
            return;
        }
        Self::print_block(&self.render_tree(db));
    }

    fn statistics(&self, stats: &Statistics) {
        Self::print_block(&self.render_statistics(stats));
    }

    fn all_cleared(&self, rooms_removed: usize) {
        self.success(&format!("All data cleared ({rooms_removed} rooms removed)"));
    }

    fn clear_cancelled(&self) {
        self.info("Nothing was cleared");
    }

    fn room_cleared(&self, room: &str, removed: &RoomRecord) {
        self.success(&format!(
            "Room {room} removed ({} storages, {} items)",
            removed.len(),
            room_item_count(removed)
        ));
    }

    fn storage_cleared(&self, location: &Location, removal: &StorageRemoval) {
        let mut message = format!("Storage {location} removed ({} items)", removal.items.len());
        if removal.room_removed {
            let _ = write!(message, "; room {} had no storages left and was removed", location.room);
        }
        self.success(&message);
    }

    fn exported(&self, report: &ExportReport) {
        self.success(&format!(
            "Exported {} rooms, {} items to {}",
            report.room_count,
            report.item_count,
            report.path.display()
        ));
    }

    fn config_info(&self, config: &ResolvedConfig) {
        let source = match config.source {
            DataFileSource::Override => "command line / environment",
            DataFileSource::Settings => "settings file",
            DataFileSource::Default => "default",
        };
        println!("{}", self.theme.header.apply_to("Configuration"));
        println!(
            "  {} {}",
            self.theme.label.apply_to("Settings file:"),
            config.settings_path.display()
        );
        println!(
            "  {} {} {}",
            self.theme.label.apply_to("Inventory file:"),
            config.data_file.display(),
            self.theme.muted.apply_to(format!("({source})"))
        );
    }

    fn data_path_set(&self, path: &Path) {
        self.success(&format!("Inventory file is now {}", path.display()));
    }

    fn version_info(&self, info: &VersionInfo) {
        println!("stash {}", info.version);
        println!(
            "git: {}{}",
            info.git_sha,
            if info.git_dirty { " (dirty)" } else { "" }
        );
        println!("built: {}", info.build_timestamp);
        println!("rustc: {}", info.rustc_version);
        println!("target: {}", info.target);
    }
}
