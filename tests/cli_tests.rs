//! Integration tests for the paramws CLI
//!
//! These tests run the actual binary and verify output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the binary to test
fn paramws_cmd() -> Command {
    Command::cargo_bin("paramws").unwrap()
}

const COLLECTION: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "properties": {"eventid": "20201230_0000049", "mag": 6.4, "region": "CROATIA"}
    }]
}"#;

fn write_response(dir: &TempDir, body: &str) -> String {
    let file = dir.path().join("response.json");
    fs::write(&file, body).unwrap();
    file.to_str().unwrap().to_string()
}

#[test]
fn test_help_flag() {
    paramws_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Query seismic web-service responses"));
}

// ============================================================================
// get
// ============================================================================

#[test]
fn test_get_bracket_path() {
    let dir = TempDir::new().unwrap();
    let file = write_response(&dir, COLLECTION);

    paramws_cmd()
        .args(["get", &file, "features[0].properties.mag"])
        .assert()
        .success()
        .stdout(predicate::str::diff("6.4\n"));
}

#[test]
fn test_get_from_stdin() {
    paramws_cmd()
        .args(["get", "-", "features.properties.region"])
        .write_stdin(COLLECTION)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"CROATIA\""));
}

#[test]
fn test_get_missing_prints_default() {
    let dir = TempDir::new().unwrap();
    let file = write_response(&dir, COLLECTION);

    paramws_cmd()
        .args(["get", &file, "ev_mag_value", "--default=-1"])
        .assert()
        .success()
        .stdout(predicate::str::diff("-1\n"));

    paramws_cmd()
        .args(["get", &file, "ev_region", "--default", "unknown"])
        .assert()
        .success()
        .stdout(predicate::str::diff("\"unknown\"\n"));

    paramws_cmd()
        .args(["get", &file, "ev_region"])
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));
}

#[test]
fn test_get_required_fails_with_fix() {
    let dir = TempDir::new().unwrap();
    let file = write_response(&dir, COLLECTION);

    paramws_cmd()
        .args(["get", &file, "features[0].properties.depth", "--required"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PWS-010"))
        .stderr(predicate::str::contains("'depth'"))
        .stderr(predicate::str::contains("Fix:"));
}

#[test]
fn test_get_invalid_json() {
    let dir = TempDir::new().unwrap();
    let file = write_response(&dir, "{not json");

    paramws_cmd()
        .args(["get", &file, "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PWS-020"));
}

#[test]
fn test_get_missing_file() {
    paramws_cmd()
        .args(["get", "/nonexistent/response.json", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

// ============================================================================
// extract
// ============================================================================

#[test]
fn test_extract_builtin_map() {
    let dir = TempDir::new().unwrap();
    let file = write_response(&dir, COLLECTION);

    paramws_cmd()
        .args(["extract", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"magnitude\": 6.4"))
        .stdout(predicate::str::contains("\"unid\": \"20201230_0000049\""))
        .stdout(predicate::str::contains("\"depth\": null"));
}

#[test]
fn test_extract_list_response() {
    let dir = TempDir::new().unwrap();
    let file = write_response(&dir, r#"[{"ev_mag_value": 2.9, "ev_region": "SICILY, ITALY"}]"#);

    paramws_cmd()
        .args(["extract", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"magnitude\": 2.9"))
        .stdout(predicate::str::contains("\"region\": \"SICILY, ITALY\""));
}

#[test]
fn test_extract_custom_map() {
    let dir = TempDir::new().unwrap();
    let file = write_response(&dir, COLLECTION);
    let map_file = dir.path().join("map.yaml");
    fs::write(
        &map_file,
        r#"
service: custom
fields:
  mag: [ev_mag_value, "features.0.properties.mag"]
  kind: type
"#,
    )
    .unwrap();

    paramws_cmd()
        .args(["extract", &file, "--map", map_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mag\": 6.4"))
        .stdout(predicate::str::contains("\"kind\": \"FeatureCollection\""))
        .stdout(predicate::str::contains("region").not());
}

#[test]
fn test_extract_empty_list() {
    let dir = TempDir::new().unwrap();
    let file = write_response(&dir, "[]");

    paramws_cmd()
        .args(["extract", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PWS-022"));
}
