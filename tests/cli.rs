use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".ipdr-dashboard").join("config.json")
}

const BINARY_NAME: &str = "ipdr-dashboard";

fn command(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path()) // simulate different $HOME
        .env_remove("RUST_LOG");
    cmd
}

#[test]
/// Help command should list the available commands.
fn cli_help_displays_usage() {
    let home = temp_home_dir();
    command(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Usage:"))
        .stdout(contains("search").and(contains("export")).and(contains("summary")));
}

#[test]
fn summary_prints_headline_statistics() {
    let home = temp_home_dir();
    command(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("Total records:         12"))
        .stdout(contains("Application usage"));

    // Logs go to a file under the config directory, never to the terminal.
    assert!(home.path().join(".ipdr-dashboard").join("logs").is_dir());
}

#[test]
fn search_prints_matching_records() {
    let home = temp_home_dir();
    command(&home)
        .args(["search", "whatsapp"])
        .assert()
        .success()
        .stdout(contains("Search Results (3 records found)"))
        .stdout(contains("REL_004"))
        .stdout(contains("Search completed successfully"));
}

#[test]
fn search_with_filter_narrows_results() {
    let home = temp_home_dir();
    command(&home)
        .args(["search", "917280305443", "--filter", "Facebook"])
        .assert()
        .success()
        .stdout(contains("Applied Facebook filter"))
        .stdout(contains("Search Results (1 records found)"))
        .stdout(contains("REL_011"));
}

#[test]
fn blank_search_fails_with_warning() {
    let home = temp_home_dir();
    command(&home)
        .args(["search", "   "])
        .assert()
        .failure()
        .stdout(contains("[WARN]"));
}

#[test]
fn export_writes_csv_to_output() {
    let home = temp_home_dir();
    let output = home.path().join("out").join("records.csv");
    command(&home)
        .arg("export")
        .arg("--output")
        .arg(&output)
        .args(["--query", "SSH"])
        .assert()
        .success()
        .stdout(contains("Results exported successfully"));

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Record ID,A-Party,B-Party,App Type,Timestamp,Duration,Location"));
    assert_eq!(csv.lines().count(), 3);
}

#[test]
/// Values from the config file are honored.
fn export_uses_configured_export_dir() {
    let home = temp_home_dir();
    let export_dir = home.path().join("exports");
    let config_path = config_file_path(&home);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(
        &config_path,
        format!(
            r#"{{ "export_dir": {} }}"#,
            serde_json::to_string(&export_dir).unwrap()
        ),
    )
    .unwrap();

    command(&home).arg("export").assert().success();

    let csv = fs::read_to_string(export_dir.join("ipdr_search_results.csv")).unwrap();
    assert_eq!(csv.lines().count(), 13);
}

#[test]
fn data_flag_loads_dataset_file() {
    let home = temp_home_dir();
    let data = home.path().join("case.json");
    fs::write(
        &data,
        r#"{
            "records": [{
                "id": "REL_900",
                "a_party": "919000000001",
                "b_party": "919000000002",
                "communication_type": "Telegram",
                "timestamp": "2025-09-01T10:00:00Z",
                "duration_secs": 61,
                "location": "CELL_0100",
                "method": "DIRECT"
            }],
            "patterns": [],
            "cases": []
        }"#,
    )
    .unwrap();

    command(&home)
        .arg("--data")
        .arg(&data)
        .args(["search", "telegram"])
        .assert()
        .success()
        .stdout(contains("REL_900"))
        .stdout(contains("1m 1s"));
}

#[test]
fn corrupt_config_is_reported() {
    let home = temp_home_dir();
    let config_path = config_file_path(&home);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "not json").unwrap();

    command(&home)
        .arg("summary")
        .assert()
        .failure()
        .stderr(contains("Failed to load config"));
}
