//! Integration tests for the restr CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn restr() -> Command {
    let mut cmd = Command::cargo_bin("restr").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("RESTR_WORKERS");
    cmd
}

/// Test CLI responds to --help
#[test]
fn test_cli_help() {
    restr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--workers"));
}

/// Test dry run prints the banner, the per-file line and the summary
#[test]
fn test_dry_run_output() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "foo bar foo").unwrap();

    restr()
        .args(["-f", "foo", "-t", "baz", "--dry-run", "-d"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting replacement:"))
        .stdout(predicate::str::contains("[dry-run] would replace 2 occurrence(s):"))
        .stdout(predicate::str::contains("Files matched   : 1"))
        .stdout(predicate::str::contains("no files were modified"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("a.txt")).unwrap(),
        "foo bar foo"
    );
}

/// Test the legacy --test alias behaves like --dry-run
#[test]
fn test_test_alias_is_dry_run() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "foo").unwrap();

    restr()
        .args(["-f", "foo", "-t", "baz", "--test", "-d"])
        .arg(temp_dir.path())
        .assert()
        .success();

    assert_eq!(fs::read_to_string(temp_dir.path().join("a.txt")).unwrap(), "foo");
}

/// Test a real run rewrites the file and reports it
#[test]
fn test_replace_output() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "foo bar foo").unwrap();

    restr()
        .args(["-f", "foo", "-t", "baz", "-w", "2", "-d"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("replaced 2 occurrence(s):"))
        .stdout(predicate::str::contains("Total matches   : 2"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("a.txt")).unwrap(),
        "baz bar baz"
    );
}

/// Test JSON output is a single parseable document
#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "foo bar foo").unwrap();
    fs::write(temp_dir.path().join("b.bin"), b"foo\0bar").unwrap();

    let output = restr()
        .args(["-f", "foo", "-t", "baz", "--format", "json", "-d"])
        .arg(temp_dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["tool"]["name"], "restr");
    assert_eq!(value["dry_run"], false);
    assert_eq!(value["files_found"], 1);
    assert_eq!(value["files_matched"], 1);
    assert_eq!(value["matches"], 2);
}

/// Test an empty search string is a configuration error
#[test]
fn test_empty_from_fails() {
    restr()
        .args(["-f", "", "-t", "bar"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must not be empty"));
}

/// Test zero workers is a configuration error
#[test]
fn test_zero_workers_fails() {
    restr()
        .args(["-f", "foo", "-t", "bar", "-w", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--workers"));
}

/// Test a missing --from is a usage error
#[test]
fn test_missing_from_is_usage_error() {
    restr()
        .args(["-t", "bar"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--from"));
}

/// Test a missing directory fails the run
#[test]
fn test_missing_dir_fails() {
    let temp_dir = TempDir::new().unwrap();

    restr()
        .args(["-f", "foo", "-t", "bar", "-d"])
        .arg(temp_dir.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Root directory not found"));
}
