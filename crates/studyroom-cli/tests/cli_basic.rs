//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "studyroom-cli", "--"])
        .args(args)
        .env("STUDYROOM_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_task_add_and_list() {
    let (stdout, _, code) = run_cli(&["task", "add", "E2E test task", "--priority", "high"]);
    assert_eq!(code, 0, "Task add failed");
    assert!(stdout.contains("Task created:"));

    let (stdout, _, code) = run_cli(&["task", "list", "--filter", "all"]);
    assert_eq!(code, 0, "Task list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("task list should print JSON");
    assert!(parsed.is_array());
}

#[test]
fn test_subject_add() {
    let (stdout, _, code) = run_cli(&["subject", "add", "E2E Subject", "--goal", "2"]);
    assert_eq!(code, 0, "Subject add failed");
    assert!(stdout.contains("Subject created:"));
}

#[test]
fn test_session_record_updates_streak() {
    let (stdout, _, code) = run_cli(&["session", "record", "25", "--subject", "E2E Subject"]);
    assert_eq!(code, 0, "Session record failed");
    assert!(stdout.contains("Session recorded:"));
    assert!(stdout.contains("currentStreak"));

    let (stdout, _, code) = run_cli(&["streak", "show"]);
    assert_eq!(code, 0, "Streak show failed");
    assert!(stdout.contains("bestStreak"));
}

#[test]
fn test_session_record_rejects_zero_minutes() {
    let (_, stderr, code) = run_cli(&["session", "record", "0"]);
    assert_ne!(code, 0, "Zero-minute session should be rejected");
    assert!(stderr.contains("error:"));
}

#[test]
fn test_stats_summary_and_export() {
    let (stdout, _, code) = run_cli(&["stats", "summary", "--timeframe", "all"]);
    assert_eq!(code, 0, "Stats summary failed");
    assert!(stdout.contains("totalMinutes"));

    let (stdout, _, code) = run_cli(&["stats", "export", "--timeframe", "all"]);
    assert_eq!(code, 0, "Stats export failed");
    assert!(stdout.contains("Subject,Total Hours,Number of Sessions"));
}

#[test]
fn test_timer_status() {
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "Timer status failed");
    assert!(stdout.contains("StateSnapshot"));
}

#[test]
fn test_profile_show() {
    let (stdout, _, code) = run_cli(&["profile", "show"]);
    assert_eq!(code, 0, "Profile show failed");
    assert!(stdout.contains("studyPreferences"));
}
