//! Searches and statistics over data read back from disk.

use stash::error::StashError;
use stash::persist::InventoryFile;
use stash::query::{SearchMode, SearchResult, compute_statistics, find, search, search_all};
use stash::store::{InventoryDatabase, Location};
use tempfile::TempDir;

fn load_sample(temp: &TempDir) -> InventoryDatabase {
    let path = temp.path().join("storage_data.json");
    std::fs::write(
        &path,
        r#"{
            "Bedroom": {"Wardrobe": ["Shirt", "Pants"], "Nightstand": ["Lamp"]},
            "Kitchen": {"Drawer": ["Fork", "Shirt"]}
        }"#,
    )
    .unwrap();
    let loaded = InventoryFile::new(path).load();
    assert!(loaded.notice.is_none());
    loaded.db
}

#[test]
fn first_match_follows_room_order() {
    let temp = TempDir::new().unwrap();
    let db = load_sample(&temp);
    assert_eq!(
        search(&db, "Shirt", None).unwrap(),
        Some(Location::new("Bedroom", "Wardrobe"))
    );
    assert_eq!(
        search(&db, "Shirt", Some("Kitchen")).unwrap(),
        Some(Location::new("Kitchen", "Drawer"))
    );
    assert_eq!(search(&db, "shirt", None).unwrap(), None);
}

#[test]
fn all_matches_keep_full_item_lists() {
    let temp = TempDir::new().unwrap();
    let db = load_sample(&temp);
    let matches = search_all(&db, "Shirt").unwrap();
    assert_eq!(matches.room_count(), 2);
    assert_eq!(matches.items("Kitchen", "Drawer").unwrap(), ["Fork", "Shirt"]);
    assert!(matches.items("Bedroom", "Nightstand").is_none());
}

#[test]
fn find_dispatches_on_mode() {
    let temp = TempDir::new().unwrap();
    let db = load_sample(&temp);
    let first = find(&db, " Lamp ", SearchMode::First, None).unwrap();
    assert_eq!(
        first,
        SearchResult::First(Some(Location::new("Bedroom", "Nightstand")))
    );
    let none = find(&db, "Teapot", SearchMode::All, None).unwrap();
    assert!(none.is_empty());
}

#[test]
fn search_rejects_blank_term_and_unknown_room() {
    let db = InventoryDatabase::new();
    assert!(matches!(
        search(&db, "  ", None),
        Err(StashError::Validation { field: "item" })
    ));
    assert!(matches!(
        search(&db, "Fork", Some("Attic")),
        Err(StashError::RoomNotFound { .. })
    ));
}

#[test]
fn statistics_count_every_entry() {
    let temp = TempDir::new().unwrap();
    let db = load_sample(&temp);
    let stats = compute_statistics(&db);
    assert!(stats.has_data());
    assert_eq!(stats.room_count, 2);
    assert_eq!(stats.storage_count(), 3);
    assert_eq!(stats.total_item_count, 5);
    assert_eq!(stats.per_room["Bedroom"]["Wardrobe"], 2);
    assert!(!compute_statistics(&InventoryDatabase::new()).has_data());
}
