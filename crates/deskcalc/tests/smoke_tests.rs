//! Smoke tests for the deskcalc binary
//!
//! Only the non-interactive surface is driven here; the keypad needs a tty.

#![cfg(feature = "tui")]
#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the deskcalc binary
fn deskcalc() -> Command {
    let mut cmd = Command::cargo_bin("deskcalc").expect("deskcalc binary should exist");
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    deskcalc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    deskcalc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--eval"))
        .stdout(predicate::str::contains("--display-width"))
        .stdout(predicate::str::contains("--history-size"))
        .stdout(predicate::str::contains("--log-file"));
}

#[test]
fn test_unknown_flag_fails() {
    deskcalc().arg("--frobnicate").assert().failure();
}

// ============================================================================
// One-shot evaluation
// ============================================================================

#[test]
fn test_eval_integer() {
    deskcalc()
        .args(["--eval", "2+3"])
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn test_eval_float() {
    deskcalc()
        .args(["--eval", "16**0.5"])
        .assert()
        .success()
        .stdout("4.0\n");
}

#[test]
fn test_eval_power_binds_tighter_than_minus() {
    deskcalc()
        .args(["-e", "-3**2"])
        .assert()
        .success()
        .stdout("-9\n");
}

#[test]
fn test_eval_division_by_zero() {
    deskcalc()
        .args(["--eval", "5/0"])
        .assert()
        .failure()
        .code(1)
        .stdout("Error\n")
        .stderr(predicate::str::contains("Division by zero"));
}

#[test]
fn test_eval_empty_expression() {
    deskcalc()
        .args(["--eval", ""])
        .assert()
        .failure()
        .stdout("Error\n")
        .stderr(predicate::str::contains("Empty expression"));
}

#[test]
fn test_eval_deeply_nested_minus_signs() {
    let expression = format!("{}1", "-".repeat(50_000));
    deskcalc()
        .args(["--eval", &expression])
        .assert()
        .failure()
        .code(1)
        .stdout("Error\n")
        .stderr(predicate::str::contains("nested too deeply"));
}

#[test]
fn test_eval_deeply_nested_parentheses() {
    let expression = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
    deskcalc()
        .args(["--eval", &expression])
        .assert()
        .failure()
        .code(1)
        .stdout("Error\n");
}

#[test]
fn test_eval_long_addition_chain() {
    let expression = format!("1{}", "+1".repeat(20_000));
    deskcalc()
        .args(["--eval", &expression])
        .assert()
        .failure()
        .code(1)
        .stdout("Error\n");
}

#[test]
fn test_eval_malformed() {
    deskcalc()
        .args(["--eval", "1..2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed token"));
}

// ============================================================================
// Argument bounds
// ============================================================================

#[test]
fn test_history_size_out_of_range_rejected() {
    deskcalc()
        .args(["--history-size", "18446744073709551615", "--eval", "1+1"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--history-size"));
}

#[test]
fn test_history_size_at_limit_accepted() {
    deskcalc()
        .args(["--history-size", "10000", "--eval", "1+1"])
        .assert()
        .success()
        .stdout("2\n");
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn test_log_file_receives_events() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("deskcalc.log");

    deskcalc()
        .args(["--eval", "6*7", "-v", "--log-file"])
        .arg(&log)
        .assert()
        .success()
        .stdout("42\n")
        .stderr(predicate::str::is_empty());

    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("evaluated"));
    assert!(text.contains("6*7"));
}

#[test]
fn test_log_file_in_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("missing").join("deskcalc.log");

    deskcalc()
        .args(["--eval", "1+1", "--log-file"])
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_quiet_eval_has_clean_stderr() {
    deskcalc()
        .args(["-q", "--eval", "5/0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WARN").not());
}
