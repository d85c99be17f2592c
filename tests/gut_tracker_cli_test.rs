// ABOUTME: Integration tests for the gut-tracker binary
// ABOUTME: Help output, settings persistence and offline journal commands against a temp data dir
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Integration tests for the gut-tracker binary.
//!
//! Only commands that never reach an AI provider are exercised here.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run the CLI against `data_dir` and capture its output
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    run_cli_with_env(data_dir, args, &[])
}

fn run_cli_with_env(
    data_dir: &Path,
    args: &[&str],
    vars: &[(&str, &str)],
) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_gut-tracker"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env("GUT_TRACKER_DATA_DIR", data_dir)
        .env_remove("GUT_TRACKER_AI_PROVIDER")
        .env_remove("RUST_LOG")
        .env_remove("LOG_FORMAT")
        .envs(vars.iter().copied())
        .output()
        .unwrap();

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    (exit_code, stdout, stderr)
}

#[test]
fn test_cli_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    let (exit_code, stdout, _stderr) = run_cli(dir.path(), &["--help"]);

    assert_eq!(exit_code, 0);
    for command in ["days", "correlations", "analyze", "recognize", "fodmap", "voice", "export", "settings"] {
        assert!(stdout.contains(command), "help should mention '{command}'");
    }
}

#[test]
fn test_settings_select_persists_provider() {
    let dir = TempDir::new().unwrap();

    let (exit_code, stdout, _stderr) = run_cli(dir.path(), &["settings", "select", "gemini"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Selected gemini"));
    assert!(dir.path().join("ai-settings.b64").exists());

    let (exit_code, stdout, _stderr) = run_cli(dir.path(), &["settings", "show"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Selected provider: gemini (Google Gemini)"));
}

#[test]
fn test_settings_select_unknown_provider_fails() {
    let dir = TempDir::new().unwrap();

    let (exit_code, _stdout, stderr) = run_cli(dir.path(), &["settings", "select", "mistral"]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("mistral"));
    assert!(!dir.path().join("ai-settings.b64").exists());
}

#[test]
fn test_settings_configure_never_prints_key() {
    let dir = TempDir::new().unwrap();

    let (exit_code, stdout, _stderr) = run_cli(
        dir.path(),
        &["settings", "configure", "anthropic", "--api-key", "sk-ant-secret", "--model", "claude-test"],
    );

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("claude-test"));
    assert!(!stdout.contains("sk-ant-secret"));
}

#[test]
fn test_days_on_empty_journal() {
    let dir = TempDir::new().unwrap();

    let (exit_code, stdout, _stderr) = run_cli(dir.path(), &["days"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("0 distinct day(s) recorded"));
    assert!(stdout.contains("7 more to go"));
}

#[test]
fn test_every_log_format_initializes() {
    let dir = TempDir::new().unwrap();

    for format in ["pretty", "json", "compact"] {
        let (exit_code, stdout, stderr) =
            run_cli_with_env(dir.path(), &["--verbose", "days"], &[("LOG_FORMAT", format)]);

        assert_eq!(exit_code, 0, "LOG_FORMAT={format}: {stderr}");
        assert!(stdout.contains("0 distinct day(s) recorded"));
        assert!(stderr.contains("logging initialized"), "LOG_FORMAT={format}: {stderr}");
    }
}

#[test]
fn test_csv_export_of_empty_journal_is_header_only() {
    let dir = TempDir::new().unwrap();

    let (exit_code, stdout, _stderr) = run_cli(dir.path(), &["export", "--format", "csv"]);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim_end(), "type,date,time,category,details,fodmap,severity");
}

#[test]
fn test_fodmap_requires_food_names() {
    let dir = TempDir::new().unwrap();

    let (exit_code, _stdout, stderr) = run_cli(dir.path(), &["fodmap"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("required"));
}
