//! Mutating operations on the inventory.
//!
//! Every operation validates first and mutates last, so a failure leaves the
//! database exactly as it was.

use tracing::{debug, info, instrument, trace};

use super::schema::{AddOutcome, DuplicatePolicy, InventoryDatabase, RoomRecord, StorageRemoval};
use crate::error::{Result, StashError};

/// Separator between items in one free-text entry (full-width semicolon).
pub const ITEM_DELIMITER: char = '；';

/// Split free text into candidate item names.
///
/// Pieces are trimmed and empty pieces dropped. Repeats inside the text are
/// kept. ASCII `;` is an ordinary character.
pub fn split_items(raw: &str) -> Vec<String> {
    raw.split(ITEM_DELIMITER)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim a required field, rejecting empty input.
pub fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StashError::Validation { field });
    }
    Ok(trimmed)
}

impl InventoryDatabase {
    /// Append the items in `raw` to `room`/`storage`.
    ///
    /// `decide` is called once, with the already-present candidates, only
    /// when at least one candidate is a duplicate. Room and storage are
    /// created on first use.
    #[instrument(skip(self, decide))]
    pub fn add_items<F>(
        &mut self,
        room: &str,
        storage: &str,
        raw: &str,
        decide: F,
    ) -> Result<AddOutcome>
    where
        F: FnOnce(&[String]) -> DuplicatePolicy,
    {
        let room = require("room", room)?;
        let storage = require("storage", storage)?;
        let raw = require("items", raw)?;

        let candidates = split_items(raw);
        if candidates.is_empty() {
            return Err(StashError::Validation { field: "items" });
        }
        trace!(count = candidates.len(), "Parsed candidate items");

        let existing = self.items(room, storage).unwrap_or_default();
        let duplicates: Vec<String> = candidates
            .iter()
            .filter(|candidate| existing.contains(candidate))
            .cloned()
            .collect();

        if !duplicates.is_empty() {
            debug!(?duplicates, "Duplicate items detected");
            if decide(&duplicates) == DuplicatePolicy::Skip {
                info!(room, storage, "Add skipped because of duplicates");
                return Ok(AddOutcome {
                    room: room.to_string(),
                    storage: storage.to_string(),
                    added: Vec::new(),
                    duplicates,
                    skipped: true,
                });
            }
        }

        self.rooms
            .entry(room.to_string())
            .or_default()
            .entry(storage.to_string())
            .or_default()
            .extend(candidates.iter().cloned());
        info!(room, storage, added = candidates.len(), "Items added");

        Ok(AddOutcome {
            room: room.to_string(),
            storage: storage.to_string(),
            added: candidates,
            duplicates,
            skipped: false,
        })
    }

    /// [`add_items`](Self::add_items) with a decision made up front.
    pub fn add_items_with(
        &mut self,
        room: &str,
        storage: &str,
        raw: &str,
        policy: DuplicatePolicy,
    ) -> Result<AddOutcome> {
        self.add_items(room, storage, raw, |_| policy)
    }

    /// Drop storages with no items, then rooms with no storages.
    ///
    /// Only hand-edited files contain these. Returns how many rooms and
    /// storages were removed.
    pub fn drop_empty_containers(&mut self) -> usize {
        let mut removed = 0;
        self.rooms.retain(|room, record| {
            let before = record.len();
            record.retain(|_, items| !items.is_empty());
            removed += before - record.len();
            if record.is_empty() {
                debug!(room, "Dropping room without storages");
                removed += 1;
                return false;
            }
            true
        });
        removed
    }

    /// Remove every room.
    pub fn clear_all(&mut self) {
        info!(rooms = self.rooms.len(), "Clearing all rooms");
        self.rooms.clear();
    }

    /// Remove a room and everything in it, returning what was removed.
    #[instrument(skip(self))]
    pub fn clear_room(&mut self, room: &str) -> Result<RoomRecord> {
        let room = require("room", room)?;
        let removed = self
            .rooms
            .remove(room)
            .ok_or_else(|| StashError::RoomNotFound {
                room: room.to_string(),
            })?;
        info!(room, storages = removed.len(), "Room cleared");
        Ok(removed)
    }

    /// Remove one storage from a room.
    ///
    /// A room left without storages is removed too.
    #[instrument(skip(self))]
    pub fn clear_storage(&mut self, room: &str, storage: &str) -> Result<StorageRemoval> {
        let room = require("room", room)?;
        let storage = require("storage", storage)?;

        let record = self
            .rooms
            .get_mut(room)
            .ok_or_else(|| StashError::RoomNotFound {
                room: room.to_string(),
            })?;
        let items = record
            .remove(storage)
            .ok_or_else(|| StashError::StorageNotFound {
                room: room.to_string(),
                storage: storage.to_string(),
            })?;

        let room_removed = record.is_empty();
        if room_removed {
            self.rooms.remove(room);
            debug!(room, "Room removed after its last storage was cleared");
        }
        info!(room, storage, items = items.len(), "Storage cleared");

        Ok(StorageRemoval {
            items,
            room_removed,
        })
    }
}
