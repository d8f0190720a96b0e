//! Inventory data types.
//!
//! The in-memory shape is exactly the on-disk shape:
//! `{ room: { storage: [item, ...] } }`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Storage name → ordered item list.
pub type RoomRecord = BTreeMap<String, Vec<String>>;

/// The whole inventory: room name → [`RoomRecord`].
///
/// Rooms and storages iterate in lexicographic order. Item lists keep
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryDatabase {
    pub(crate) rooms: BTreeMap<String, RoomRecord>,
}

impl InventoryDatabase {
    /// Create an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no rooms are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Number of rooms.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Iterate rooms in database order.
    pub fn rooms(&self) -> impl Iterator<Item = (&str, &RoomRecord)> {
        self.rooms.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Look up a single room.
    #[must_use]
    pub fn room(&self, room: &str) -> Option<&RoomRecord> {
        self.rooms.get(room)
    }

    /// Item list stored at `room`/`storage`, if both exist.
    #[must_use]
    pub fn items(&self, room: &str, storage: &str) -> Option<&[String]> {
        self.rooms
            .get(room)
            .and_then(|record| record.get(storage))
            .map(Vec::as_slice)
    }
}

impl FromIterator<(String, RoomRecord)> for InventoryDatabase {
    fn from_iter<I: IntoIterator<Item = (String, RoomRecord)>>(iter: I) -> Self {
        Self {
            rooms: iter.into_iter().collect(),
        }
    }
}

/// A room/storage pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub room: String,
    pub storage: String,
}

impl Location {
    #[must_use]
    pub fn new(room: impl Into<String>, storage: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            storage: storage.into(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.room, self.storage)
    }
}

/// Decision for an add that would repeat items already in the storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Append every candidate, duplicates included.
    AddAnyway,
    /// Leave the storage untouched.
    Skip,
}

/// Result of [`InventoryDatabase::add_items`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOutcome {
    pub room: String,
    pub storage: String,
    /// Items actually appended, in order.
    pub added: Vec<String>,
    /// Candidates that were already present before the add.
    pub duplicates: Vec<String>,
    /// True when duplicates were found and the caller chose to skip.
    pub skipped: bool,
}

/// Result of [`InventoryDatabase::clear_storage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageRemoval {
    /// Items that were held by the removed storage.
    pub items: Vec<String>,
    /// True when the room lost its last storage and was removed as well.
    pub room_removed: bool,
}
