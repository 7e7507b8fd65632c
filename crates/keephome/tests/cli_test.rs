//! Integration tests for the `keephome` CLI binary.
//!
//! These tests validate argument parsing, help output, shell
//! completions, local validation, and the offline commands — all
//! without requiring a live device.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `keephome` binary with env isolation.
///
/// Points the settings file into a temp dir so tests never touch the
/// user's real configuration.
fn keephome_cmd(settings_dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("keephome");
    cmd.env(
        "KEEPHOME_SETTINGS_FILE",
        settings_dir.path().join("settings.toml"),
    )
    .env_remove("KEEPHOME_SSID")
    .env_remove("KEEPHOME_PASSWORD")
    .env_remove("KEEPHOME_IP")
    .env_remove("KEEPHOME_AP_MODE");
    cmd
}

fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let dir = tempdir();
    let output = keephome_cmd(&dir).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = String::from_utf8_lossy(&output.stderr);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn help_flag_lists_commands() {
    let dir = tempdir();
    keephome_cmd(&dir).arg("--help").assert().success().stdout(
        predicate::str::contains("KeepHome")
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("discover"))
            .and(predicate::str::contains("restart")),
    );
}

#[test]
fn version_flag() {
    let dir = tempdir();
    keephome_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("keephome"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn completions_bash() {
    let dir = tempdir();
    keephome_cmd(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Offline commands ────────────────────────────────────────────────

#[test]
fn settings_show_prints_defaults_without_network() {
    let dir = tempdir();
    keephome_cmd(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("KeepHome").and(predicate::str::contains("192.168.4.1")),
        );
}

#[test]
fn prefs_show_prints_defaults() {
    let dir = tempdir();
    keephome_cmd(&dir)
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("off").and(predicate::str::contains("1 minute")),
        );
}

#[test]
fn prefs_survive_between_invocations() {
    let dir = tempdir();
    keephome_cmd(&dir)
        .args(["prefs", "set", "--interval", "15"])
        .assert()
        .success();
    keephome_cmd(&dir)
        .args(["prefs", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15 minutes"));
}

#[test]
fn set_ip_updates_the_local_mirror() {
    let dir = tempdir();
    keephome_cmd(&dir)
        .args(["set", "ip", "10.0.0.42"])
        .assert()
        .success();
    keephome_cmd(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10.0.0.42"));
}

#[test]
fn support_prints_the_website() {
    let dir = tempdir();
    keephome_cmd(&dir)
        .arg("support")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://anderserver.ddns.net"));
}

// ── Local validation ────────────────────────────────────────────────

#[test]
fn invalid_ip_is_rejected_before_any_network_io() {
    let dir = tempdir();
    let output = keephome_cmd(&dir)
        .args(["set", "ip", "999.1.1.1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn alphabetic_ip_is_rejected() {
    let dir = tempdir();
    let output = keephome_cmd(&dir)
        .args(["set", "ip", "abc.def.ghi.jkl"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn short_password_is_rejected() {
    let dir = tempdir();
    let output = keephome_cmd(&dir)
        .args(["set", "password", "short"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = String::from_utf8_lossy(&output.stderr);
    assert!(text.contains("8"), "expected length hint in: {text}");
}

#[test]
fn out_of_set_interval_is_rejected() {
    let dir = tempdir();
    let output = keephome_cmd(&dir)
        .args(["prefs", "set", "--interval", "7"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn prefs_set_without_flags_is_a_usage_error() {
    let dir = tempdir();
    let output = keephome_cmd(&dir)
        .args(["prefs", "set"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}
