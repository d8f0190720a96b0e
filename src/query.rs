//! Read-only queries: item search and inventory statistics.
//!
//! Matching is exact equality against list elements. "Fork" does not match
//! "Forks" or "Fork (silver)".

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{Result, StashError};
use crate::store::{InventoryDatabase, Location, RoomRecord, require};

/// How many matches a search collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Stop at the first storage holding the item.
    #[default]
    First,
    /// Every storage holding the item, grouped by room.
    All,
}

/// Outcome of [`find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    First(Option<Location>),
    All(InventoryDatabase),
}

impl SearchResult {
    /// True when nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::First(hit) => hit.is_none(),
            Self::All(matches) => matches.is_empty(),
        }
    }
}

/// Rooms a search walks: all of them, or just the filtered one.
fn scoped_rooms<'a>(
    db: &'a InventoryDatabase,
    room_filter: Option<&str>,
) -> Result<Vec<(&'a str, &'a RoomRecord)>> {
    match room_filter {
        None => Ok(db.rooms().collect()),
        Some(filter) => {
            let filter = require("room", filter)?;
            db.rooms()
                .find(|(name, _)| *name == filter)
                .map(|room| vec![room])
                .ok_or_else(|| StashError::RoomNotFound {
                    room: filter.to_string(),
                })
        }
    }
}

/// First room/storage whose item list contains `term`.
///
/// Rooms, then storages, are visited in database order.
#[instrument(skip(db))]
pub fn search(
    db: &InventoryDatabase,
    term: &str,
    room_filter: Option<&str>,
) -> Result<Option<Location>> {
    let term = require("item", term)?;
    let hit = scoped_rooms(db, room_filter)?
        .into_iter()
        .find_map(|(room, record)| {
            record
                .iter()
                .find(|(_, items)| items.iter().any(|item| item == term))
                .map(|(storage, _)| Location::new(room, storage.as_str()))
        });
    debug!(found = hit.is_some(), "First-match search finished");
    Ok(hit)
}

/// Every storage whose item list contains `term`, with its full item list.
#[instrument(skip(db))]
pub fn search_all(db: &InventoryDatabase, term: &str) -> Result<InventoryDatabase> {
    search_all_in(db, term, None)
}

fn search_all_in(
    db: &InventoryDatabase,
    term: &str,
    room_filter: Option<&str>,
) -> Result<InventoryDatabase> {
    let term = require("item", term)?;
    let matches: InventoryDatabase = scoped_rooms(db, room_filter)?
        .into_iter()
        .filter_map(|(room, record)| {
            let hits: RoomRecord = record
                .iter()
                .filter(|(_, items)| items.iter().any(|item| item == term))
                .map(|(storage, items)| (storage.clone(), items.clone()))
                .collect();
            (!hits.is_empty()).then(|| (room.to_string(), hits))
        })
        .collect();
    debug!(rooms = matches.room_count(), "Exhaustive search finished");
    Ok(matches)
}

/// Search in the requested mode.
pub fn find(
    db: &InventoryDatabase,
    term: &str,
    mode: SearchMode,
    room_filter: Option<&str>,
) -> Result<SearchResult> {
    match mode {
        SearchMode::First => search(db, term, room_filter).map(SearchResult::First),
        SearchMode::All => search_all_in(db, term, room_filter).map(SearchResult::All),
    }
}

/// Aggregate counts over the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub room_count: usize,
    /// Sum of every item list length; repeated items count individually.
    pub total_item_count: usize,
    /// Room → storage → item count.
    pub per_room: BTreeMap<String, BTreeMap<String, usize>>,
}

impl Statistics {
    /// False for an empty inventory, which callers report as "no data".
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.room_count > 0
    }

    /// Number of storages across all rooms.
    #[must_use]
    pub fn storage_count(&self) -> usize {
        self.per_room.values().map(BTreeMap::len).sum()
    }
}

/// Count rooms and items.
#[instrument(skip(db))]
pub fn compute_statistics(db: &InventoryDatabase) -> Statistics {
    let per_room: BTreeMap<String, BTreeMap<String, usize>> = db
        .rooms()
        .map(|(room, record)| {
            let counts = record
                .iter()
                .map(|(storage, items)| (storage.clone(), items.len()))
                .collect();
            (room.to_string(), counts)
        })
        .collect();
    let total_item_count = per_room.values().flat_map(BTreeMap::values).sum();

    Statistics {
        room_count: db.room_count(),
        total_item_count,
        per_room,
    }
}
