// Smoke tests for the visindex CLI surface.
//
// These use assert_cmd to invoke the binary and check argument handling
// and exit codes without touching snapshot data.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a Command for the visindex binary.
fn visindex() -> Command {
    Command::cargo_bin("visindex").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    visindex()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("visindex"));
}

#[test]
fn cli_help_flag() {
    visindex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Composite visibility index"));
}

#[test]
fn compute_requires_path() {
    visindex()
        .arg("compute")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn forecast_requires_path() {
    visindex()
        .arg("forecast")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn verbose_and_quiet_conflict() {
    visindex()
        .args(["-v", "-q", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn compute_missing_path_exits_with_runtime_failure() {
    visindex()
        .args(["compute", "/definitely/not/a/snapshot.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}
