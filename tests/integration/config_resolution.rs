//! Settings file handling and inventory file selection.

use std::fs;
use std::path::PathBuf;

use stash::config::{DataFileSource, ResolvedConfig, Settings};
use stash::error::StashError;
use tempfile::TempDir;

#[test]
fn override_beats_settings() {
    let temp = TempDir::new().unwrap();
    let settings_path = temp.path().join("config.toml");
    Settings {
        data_file: Some(PathBuf::from("configured.json")),
    }
    .save(&settings_path)
    .unwrap();

    let forced = temp.path().join("forced.json");
    let resolved = ResolvedConfig::resolve(settings_path, Some(forced.clone())).unwrap();
    assert_eq!(resolved.source, DataFileSource::Override);
    assert_eq!(resolved.data_file, forced);
}

#[test]
fn relative_settings_path_is_next_to_settings_file() {
    let temp = TempDir::new().unwrap();
    let settings_path = temp.path().join("nested/config.toml");
    Settings {
        data_file: Some(PathBuf::from("data/inventory.json")),
    }
    .save(&settings_path)
    .unwrap();

    let resolved = ResolvedConfig::resolve(settings_path, None).unwrap();
    assert_eq!(resolved.source, DataFileSource::Settings);
    assert_eq!(
        resolved.data_file,
        temp.path().join("nested/data/inventory.json")
    );
}

#[test]
fn missing_settings_fall_back_to_default() {
    let temp = TempDir::new().unwrap();
    let resolved = ResolvedConfig::resolve(temp.path().join("config.toml"), None).unwrap();
    assert_eq!(resolved.source, DataFileSource::Default);
    assert_eq!(resolved.settings, Settings::default());
    assert_eq!(
        resolved.data_file.file_name().and_then(|n| n.to_str()),
        Some("storage_data.json")
    );
}

#[test]
fn unknown_settings_keys_are_rejected() {
    let temp = TempDir::new().unwrap();
    let settings_path = temp.path().join("config.toml");
    fs::write(&settings_path, "data_file = \"a.json\"\ncolour = \"blue\"\n").unwrap();

    let err = ResolvedConfig::resolve(settings_path, None).unwrap_err();
    assert!(matches!(err, StashError::ConfigParse(_)));
    assert_eq!(err.kind(), "config");
}
