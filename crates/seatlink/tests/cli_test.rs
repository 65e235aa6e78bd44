//! Integration tests for the `seatlink` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `seatlink` binary with env isolation.
///
/// Clears all `SEATLINK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn seatlink_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("seatlink");
    cmd.env("HOME", "/tmp/seatlink-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/seatlink-cli-test-nonexistent")
        .env_remove("SEATLINK_ACCOUNT")
        .env_remove("SEATLINK_CONFIG")
        .env_remove("SEATLINK_OUTPUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = seatlink_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    seatlink_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("SEAT Connect")
            .and(predicate::str::contains("vehicles"))
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("lock")),
    );
}

#[test]
fn test_version_flag() {
    seatlink_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("seatlink"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash_cover_vehicle_commands() {
    seatlink_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("vehicles")
                .and(predicate::str::contains("climate"))
                .and(predicate::str::contains("unlock")),
        );
}

#[test]
fn test_completions_zsh() {
    seatlink_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef").and(predicate::str::contains("_seatlink")));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_subcommand_typo_suggests_nearest() {
    let output = seatlink_cmd().arg("climat").output().unwrap();
    assert!(!output.status.success(), "typo must not parse");
    let text = combined_output(&output);
    assert!(
        text.contains("climate"),
        "expected a suggestion for 'climat':\n{text}"
    );
}

#[test]
fn test_vehicles_no_config() {
    seatlink_cmd().arg("vehicles").assert().failure().stderr(
        predicate::str::contains("account")
            .or(predicate::str::contains("config"))
            .or(predicate::str::contains("Account")),
    );
}

#[test]
fn test_missing_credentials_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        r#"
default_account = "home"

[accounts.home]
client_id = "abc"
"#,
    )
    .unwrap();

    let output = seatlink_cmd()
        .args(["--config", config.to_str().unwrap(), "vehicles"])
        .output()
        .unwrap();
    assert_eq!(
        output.status.code(),
        Some(3),
        "missing credentials map to the auth exit code:\n{}",
        combined_output(&output)
    );
}

#[test]
fn test_output_format_lists_supported_values() {
    // `yaml` is a plausible guess; the error must name what is supported.
    let output = seatlink_cmd()
        .args(["--output", "yaml", "vehicles"])
        .output()
        .unwrap();
    assert!(!output.status.success(), "unsupported format must not parse");
    let text = combined_output(&output);
    assert!(
        text.contains("table") && text.contains("json"),
        "expected the supported formats in the error:\n{text}"
    );
}

#[test]
fn test_explicit_account_must_exist_in_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        r#"
default_account = "home"

[accounts.home]
client_id = "abc"
client_secret = "shh"
refresh_token = "tok"
"#,
    )
    .unwrap();

    // Flags parse fine; the failure is about the account, by name.
    seatlink_cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "--account",
            "ghost",
            "--output",
            "json",
            "--verbose",
            "--timeout",
            "60",
            "vehicles",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    seatlink_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_path_prints_something() {
    seatlink_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_redacts_secrets() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        r#"
[accounts.home]
client_id = "abc"
client_secret = "super-secret"
refresh_token = "very-private"
"#,
    )
    .unwrap();

    seatlink_cmd()
        .args(["--config", config.to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("super-secret")
                .not()
                .and(predicate::str::contains("very-private").not())
                .and(predicate::str::contains("***")),
        );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_climate_subcommands_exist() {
    seatlink_cmd()
        .args(["climate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("start").and(predicate::str::contains("stop")));
}

#[test]
fn test_config_subcommands_exist() {
    seatlink_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("show")
                .and(predicate::str::contains("path"))
                .and(predicate::str::contains("accounts")),
        );
}
