//! CLI Integration Tests
//!
//! Tests for `colscan` CLI commands using `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the CLI binary command
#[allow(deprecated)]
fn colscan_cmd() -> Command {
    let mut cmd = Command::cargo_bin("colscan").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// Help & Version Tests
// =============================================================================

#[test]
fn test_help_displays_usage() {
    colscan_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("colscan"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_displays_version() {
    colscan_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("colscan"));
}

#[test]
fn test_invalid_command_shows_error() {
    colscan_cmd()
        .arg("invalid_command_xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// =============================================================================
// Compare Command Tests
// =============================================================================

#[test]
fn test_compare_default_scenario_agrees() {
    colscan_cmd()
        .args(["compare", "--workers", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1001 rows"))
        .stdout(predicate::str::contains("2 distinct"))
        .stdout(predicate::str::contains("agree"))
        .stdout(predicate::str::contains("DISAGREE").not());
}

#[test]
fn test_compare_json_output() {
    let output = colscan_cmd()
        .args(["compare", "--workers", "1", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["encode"]["rows"], 1001);
    assert_eq!(report["encode"]["distinct"], 2);

    let comparisons = report["comparisons"].as_array().unwrap();
    assert_eq!(comparisons.len(), 3);
    assert!(comparisons.iter().all(|c| c["agrees"] == true));
    // equality for "test1" hits one row; prefix "test" hits both codes and all rows
    assert_eq!(comparisons[0]["vector_matches"], 1);
    assert_eq!(comparisons[1]["vector_matches"], 2);
    assert_eq!(comparisons[2]["vector_matches"], 1001);
}

#[test]
fn test_compare_each_backend() {
    for backend in ["auto", "scalar", "portable", "native"] {
        colscan_cmd()
            .args(["compare", "--repetitions", "37", "--backend", backend])
            .assert()
            .success()
            .stdout(predicate::str::contains("DISAGREE").not());
    }
}

#[test]
fn test_compare_long_prefix_parallel() {
    colscan_cmd()
        .args([
            "compare",
            "--repetitions",
            "5000",
            "--value",
            "customer/region/eu-west-1",
            "--distinct",
            "customer/region/us-east-1",
            "--prefix",
            "customer/region/eu",
            "--workers",
            "4",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("5001 rows"));
}

#[test]
fn test_compare_rejects_tail_from_config() {
    // Arrange: 1001 rows do not fill whole 4-lane blocks
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("colscan.toml");
    fs::write(
        &config_path,
        "[scan]\ntail_policy = \"reject\"\n\n[encode]\nworkers = 1\n",
    )
    .unwrap();

    // Act & Assert
    colscan_cmd()
        .arg("--config")
        .arg(&config_path)
        .arg("compare")
        .assert()
        .failure()
        .stderr(predicate::str::contains("COLSCAN-001"));
}

#[test]
fn test_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("colscan.toml");
    fs::write(&config_path, "[encode]\nmin_chunk_len = 0\n").unwrap();

    colscan_cmd()
        .arg("--config")
        .arg(&config_path)
        .arg("compare")
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_chunk_len"));
}

// =============================================================================
// Backends & KV Tests
// =============================================================================

#[test]
fn test_backends_lists_scalar_and_portable() {
    colscan_cmd()
        .arg("backends")
        .assert()
        .success()
        .stdout(predicate::str::contains("scalar"))
        .stdout(predicate::str::contains("portable"))
        .stdout(predicate::str::contains("detected"));
}

#[test]
fn test_kv_round_trip() {
    colscan_cmd()
        .args(["kv", "--key", "color", "--value", "blue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("color -> blue"))
        .stdout(predicate::str::contains("removed"))
        .stdout(predicate::str::contains("not found"));
}
