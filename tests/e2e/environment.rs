//! Environment variable behavior end-to-end tests.

use std::fs;

use crate::common::assertions::assert_not_json;
use crate::common::cli::CliRunner;
use crate::common::init_test_logging;

#[test]
fn stash_format_env_sets_json_output() {
    init_test_logging();
    let cli = CliRunner::new().with_env("STASH_FORMAT", "json");
    let result = cli.run(&["version"]);
    result.assert_success();

    let json: serde_json::Value = serde_json::from_str(result.stdout.trim())
        .expect("Expected JSON output with STASH_FORMAT=json");
    assert!(json.get("version").is_some());
}

#[test]
fn stash_format_env_sets_compact_json() {
    init_test_logging();
    let cli = CliRunner::new().with_env("STASH_FORMAT", "json-compact");
    let result = cli.run(&["stats"]);
    result.assert_success();

    let stdout = result.stdout.trim_end();
    let json: serde_json::Value = serde_json::from_str(stdout)
        .expect("Expected JSON output with STASH_FORMAT=json-compact");
    assert_eq!(json["has_data"], false);
    assert_eq!(stdout.lines().count(), 1, "Expected compact JSON single line");
}

#[test]
fn cli_format_flag_overrides_env() {
    init_test_logging();
    let cli = CliRunner::new().with_env("STASH_FORMAT", "json");
    let result = cli.run(&["version", "--format=text"]);
    result.assert_success();
    assert_not_json(&result.stdout);
}

#[test]
fn data_file_flag_overrides_env() {
    init_test_logging();
    let cli = CliRunner::new();
    let other = cli.dir().join("elsewhere/other.json");
    let other_arg = other.display().to_string();

    cli.run_robot(&["--data-file", &other_arg, "add", "Garage", "Shelf", "Drill"])
        .assert_success();

    assert!(other.exists(), "--data-file target should be written");
    let written = fs::read_to_string(&other).unwrap();
    assert!(written.contains("Drill"));
    assert!(
        !cli.data_file().exists(),
        "STASH_DATA_FILE target should be untouched"
    );
}

#[test]
fn settings_file_decides_when_no_override() {
    init_test_logging();
    let cli = CliRunner::new().without_data_file_override();
    let configured = cli.dir().join("configured.json");
    let configured_arg = configured.display().to_string();

    cli.run_robot(&["config", "set-path", &configured_arg])
        .assert_success()
        .assert_json_field("/ok", &serde_json::json!(true));

    cli.run_robot(&["add", "Attic", "Box", "Lamp"]).assert_success();
    let written = fs::read_to_string(&configured).expect("configured file should exist");
    assert!(written.contains("Lamp"));

    let show = cli.run_robot(&["config", "show"]);
    show.assert_success()
        .assert_json_field("/source", &serde_json::json!("settings"))
        .assert_json_field("/data_file", &serde_json::json!(configured_arg));
}
