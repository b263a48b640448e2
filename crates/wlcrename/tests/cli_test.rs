//! Integration tests for the `wlcrename` binary.
//!
//! Argument parsing, help output, completions, dry runs and error exit
//! codes, all without a live controller.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `wlcrename` binary with env isolation.
///
/// Clears all `WLC_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn wlc_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("wlcrename");
    cmd.env("HOME", "/tmp/wlcrename-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/wlcrename-cli-test-nonexistent")
        .env_remove("WLC_PROFILE")
        .env_remove("WLC_HOST")
        .env_remove("WLC_PORT")
        .env_remove("WLC_USERNAME")
        .env_remove("WLC_PASSWORD")
        .env_remove("WLC_DIALECT")
        .env_remove("WLC_TIMEOUT")
        .env_remove("WLC_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Write a change list with a header row and the given data rows.
fn change_list(dir: &Path, rows: &[(&str, &str)]) -> PathBuf {
    let path = dir.join("rename_ap.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Current AP Name").unwrap();
    sheet.write_string(0, 1, "New AP Name").unwrap();
    for (row, (current, new)) in (1u32..).zip(rows) {
        sheet.write_string(row, 0, *current).unwrap();
        sheet.write_string(row, 1, *new).unwrap();
    }
    workbook.save(&path).unwrap();
    path
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    wlc_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("access points")
            .and(predicate::str::contains("export"))
            .and(predicate::str::contains("rename"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    wlc_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wlcrename"));
}

#[test]
fn test_rename_help_lists_flags() {
    wlc_cmd().args(["rename", "--help"]).assert().success().stdout(
        predicate::str::contains("--sheet")
            .and(predicate::str::contains("--strict-scan"))
            .and(predicate::str::contains("--dry-run")),
    );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    wlc_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    wlc_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wlcrename"));
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_unknown_subcommand() {
    let output = wlc_cmd().arg("frobnicate").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_dialect_rejected() {
    let output = wlc_cmd()
        .args(["--dialect", "nxos", "export"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("iosxe"),
        "Expected possible values in:\n{text}"
    );
}

#[test]
fn test_missing_host_without_terminal() {
    let output = wlc_cmd().arg("export").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("host"), "Expected host error in:\n{text}");
}

#[test]
fn test_unknown_profile() {
    let output = wlc_cmd()
        .args(["--profile", "nope", "export"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("nope"));
}

// ── Spreadsheet handling ────────────────────────────────────────────

#[test]
fn test_missing_workbook_exit_code() {
    let dir = TempDir::new().unwrap();
    let output = wlc_cmd()
        .current_dir(dir.path())
        .args(["rename", "--dry-run"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(10));
    assert!(combined_output(&output).contains("rename_ap.xlsx"));
}

#[test]
fn test_missing_sheet_exit_code() {
    let dir = TempDir::new().unwrap();
    let path = change_list(dir.path(), &[("AP-1", "AP-1-NEW")]);
    let output = wlc_cmd()
        .arg("rename")
        .arg("--file")
        .arg(&path)
        .args(["--sheet", "Renames", "--dry-run"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(10));
    assert!(combined_output(&output).contains("Sheet1"));
}

#[test]
fn test_dry_run_reports_rows() {
    let dir = TempDir::new().unwrap();
    change_list(
        dir.path(),
        &[("AP-1", "Lobby-01"), ("AP-2", " AP-2 "), ("", "Dock-07")],
    );

    wlc_cmd()
        .current_dir(dir.path())
        .args(["rename", "--dry-run", "--output", "plain"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("AP-1\tLobby-01\tOK")
                .and(predicate::str::contains(
                    "Data Error: Current AP Name and New AP Name is the same",
                ))
                .and(predicate::str::contains(
                    "Data Error: Current AP Name not defined",
                )),
        )
        .stderr(predicate::str::contains("1 of 3 rows"));
}

#[test]
fn test_dry_run_json() {
    let dir = TempDir::new().unwrap();
    let path = change_list(dir.path(), &[("AP 1", "AP-1-NEW")]);

    let output = wlc_cmd()
        .arg("rename")
        .arg("--file")
        .arg(&path)
        .args(["--dry-run", "--output", "json", "--quiet"])
        .output()
        .unwrap();

    // --quiet suppresses stdout data as well as status text.
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let output = wlc_cmd()
        .arg("rename")
        .arg("--file")
        .arg(&path)
        .args(["--dry-run", "--output", "json"])
        .output()
        .unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["current_name"], "AP1");
    assert_eq!(rows[0]["status"], "valid");
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_profiles_empty() {
    wlc_cmd()
        .args(["config", "profiles"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No profiles configured"));
}
