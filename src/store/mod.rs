//! In-memory inventory: rooms → storages → items.
//!
//! # Rules
//!
//! - Room and storage names are trimmed; empty names are rejected.
//! - Adding to an unknown room/storage creates it.
//! - Clearing a room's last storage removes the room.
//! - A failed operation never leaves a partial change behind.

mod ops;
mod schema;

pub use ops::{ITEM_DELIMITER, require, split_items};
pub use schema::{
    AddOutcome, DuplicatePolicy, InventoryDatabase, Location, RoomRecord, StorageRemoval,
};
