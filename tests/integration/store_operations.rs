//! Store operations persisted through the inventory file.

use stash::error::StashError;
use stash::persist::InventoryFile;
use stash::store::{DuplicatePolicy, InventoryDatabase};
use tempfile::TempDir;

fn file_in(temp: &TempDir) -> InventoryFile {
    InventoryFile::new(temp.path().join("storage_data.json"))
}

#[test]
fn add_then_reload_keeps_order() {
    let temp = TempDir::new().unwrap();
    let file = file_in(&temp);

    let mut db = file.load().db;
    db.add_items_with("Kitchen", "Drawer", "Spoon；Fork；Spoon", DuplicatePolicy::Skip)
        .unwrap();
    file.save(&db).unwrap();

    let reloaded = file.load().db;
    assert_eq!(
        reloaded.items("Kitchen", "Drawer").unwrap(),
        ["Spoon", "Fork", "Spoon"]
    );
    assert_eq!(reloaded, db);
}

#[test]
fn trimmed_names_are_stored() {
    let mut db = InventoryDatabase::new();
    let outcome = db
        .add_items_with("  Kitchen ", " Drawer", " Fork ； Knife ", DuplicatePolicy::Skip)
        .unwrap();
    assert_eq!(outcome.room, "Kitchen");
    assert_eq!(outcome.storage, "Drawer");
    assert_eq!(db.items("Kitchen", "Drawer").unwrap(), ["Fork", "Knife"]);
}

#[test]
fn skip_policy_leaves_file_unchanged() {
    let temp = TempDir::new().unwrap();
    let file = file_in(&temp);
    let mut db = InventoryDatabase::new();
    db.add_items_with("Kitchen", "Drawer", "Fork", DuplicatePolicy::Skip)
        .unwrap();
    file.save(&db).unwrap();
    let before = std::fs::read_to_string(file.path()).unwrap();

    let mut db = file.load().db;
    let outcome = db
        .add_items_with("Kitchen", "Drawer", "Knife；Fork", DuplicatePolicy::Skip)
        .unwrap();
    assert!(outcome.skipped);
    assert_eq!(outcome.duplicates, ["Fork"]);
    assert_eq!(db.items("Kitchen", "Drawer").unwrap(), ["Fork"]);
    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), before);
}

#[test]
fn decision_callback_only_runs_for_duplicates() {
    let mut db = InventoryDatabase::new();
    db.add_items("Kitchen", "Drawer", "Fork", |_| {
        panic!("no duplicates yet")
    })
    .unwrap();

    let mut seen = Vec::new();
    db.add_items("Kitchen", "Drawer", "Fork；Knife", |duplicates| {
        seen = duplicates.to_vec();
        DuplicatePolicy::AddAnyway
    })
    .unwrap();
    assert_eq!(seen, ["Fork"]);
    assert_eq!(db.items("Kitchen", "Drawer").unwrap(), ["Fork", "Fork", "Knife"]);
}

#[test]
fn failed_operations_do_not_mutate() {
    let mut db = InventoryDatabase::new();
    db.add_items_with("Kitchen", "Drawer", "Fork", DuplicatePolicy::Skip)
        .unwrap();
    let snapshot = db.clone();

    assert!(matches!(
        db.add_items_with("", "Drawer", "Fork", DuplicatePolicy::Skip),
        Err(StashError::Validation { field: "room" })
    ));
    assert!(matches!(
        db.add_items_with("Kitchen", "Drawer", "；；", DuplicatePolicy::Skip),
        Err(StashError::Validation { field: "items" })
    ));
    assert!(matches!(
        db.clear_room("Attic"),
        Err(StashError::RoomNotFound { .. })
    ));
    assert!(matches!(
        db.clear_storage("Kitchen", "Shelf"),
        Err(StashError::StorageNotFound { .. })
    ));
    assert_eq!(db, snapshot);
}

#[test]
fn no_empty_containers_after_clearing() {
    let mut db = InventoryDatabase::new();
    db.add_items_with("Kitchen", "Drawer", "Fork", DuplicatePolicy::Skip)
        .unwrap();
    db.add_items_with("Kitchen", "Shelf", "Plate", DuplicatePolicy::Skip)
        .unwrap();

    let first = db.clear_storage("Kitchen", "Drawer").unwrap();
    assert!(!first.room_removed);
    let second = db.clear_storage("Kitchen", "Shelf").unwrap();
    assert!(second.room_removed);
    assert!(db.is_empty());
    assert_eq!(stash::persist::to_json(&db).unwrap(), "{}");
}
