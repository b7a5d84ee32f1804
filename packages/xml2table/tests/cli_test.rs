//! Integration tests for the `xml2table` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_converts_to_csv_with_preview() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("people.csv");

    let mut command = cargo_bin_cmd!("xml2table");
    command
        .arg(fixture_path("people.xml"))
        .args(["id", "name"])
        .arg("-o")
        .arg(&output)
        .args(["-l", "ID", "Name"]);
    command
        .assert()
        .success()
        .stdout(contains("Output preview:"))
        .stdout(contains("Total rows: 3."))
        .stdout(contains("Saved to:"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "ID,Name\n7,Alice\n9,Bob\n12,Carol\n"
    );
}

#[test]
fn test_reports_missing_columns() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("people.json");

    let mut command = cargo_bin_cmd!("xml2table");
    command
        .arg(fixture_path("people.xml"))
        .args(["name", "email"])
        .arg("-o")
        .arg(&output);
    command.assert().success().stdout(contains(
        "Some columns could not be found (at least in some of the rows): email",
    ));
    assert!(output.exists());
}

#[test]
fn test_preview_can_be_disabled() {
    let dir = tempdir().unwrap();

    let mut command = cargo_bin_cmd!("xml2table");
    command
        .arg(fixture_path("people.xml"))
        .arg("id")
        .arg("-o")
        .arg(dir.path().join("people.xlsx"))
        .args(["--preview-rows", "0"]);
    command
        .assert()
        .success()
        .stdout(contains("Output preview:").not());
}

#[test]
fn test_root_not_found_exits_with_failure() {
    let dir = tempdir().unwrap();

    let mut command = cargo_bin_cmd!("xml2table");
    command
        .arg(fixture_path("people.xml"))
        .arg("id")
        .args(["-p", "staff"])
        .arg("-o")
        .arg(dir.path().join("out.csv"));
    command
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error: Root not found. Query used: 'staff'"));
}

#[test]
fn test_label_count_mismatch_exits_with_failure() {
    let mut command = cargo_bin_cmd!("xml2table");
    command
        .arg(fixture_path("people.xml"))
        .args(["id", "name"])
        .args(["-l", "ID"]);
    command
        .assert()
        .failure()
        .stderr(contains("Got 1 labels for 2 columns"));
}

#[test]
fn test_missing_column_argument_is_a_usage_error() {
    let mut command = cargo_bin_cmd!("xml2table");
    command.arg(fixture_path("people.xml"));
    command.assert().failure().stderr(contains("Usage"));
}
