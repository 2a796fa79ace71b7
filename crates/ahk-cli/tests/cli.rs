// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests for the `ahk` binary.
//!
//! Each test writes scripts into a temporary directory and runs the built
//! binary against them.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const CLEAN: &str = "#Requires AutoHotkey v2.0\n\nGreet(name) {\n    MsgBox(name)\n}\n\nGreet(\"World\")\n";

fn ahk(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ahk"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run ahk")
}

fn write_script(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn lint_clean_script_succeeds() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "clean.ahk", CLEAN);
    let output = ahk(&["lint", arg(&script)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("No issues found."));
}

#[test]
fn lint_errors_exit_non_zero() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "broken.ahk", "#Requires AutoHotkey v2\n}\n");
    let output = ahk(&["lint", arg(&script)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unmatched closing brace"));
}

#[test]
fn lint_json_is_one_object_per_line() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "warn.ahk", "x = 5\n");
    let output = ahk(&["lint", arg(&script), "--format", "json"]);
    assert!(output.status.success(), "warnings alone do not fail");

    let lines: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(
        lines
            .iter()
            .any(|d| d["code"] == "UseAssignmentOperator" && d["range"]["start"][1] == 3)
    );
}

#[test]
fn disable_flag_and_config_file() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "warn.ahk", "x = 5\n");
    fs::write(
        dir.path().join("ahk.toml"),
        "[lint]\ndisabled = [\"MissingRequires\"]\n",
    )
    .unwrap();

    let output = ahk(&[
        "lint",
        arg(&script),
        "--format",
        "json",
        "--disable",
        "UseAssignmentOperator",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).trim().is_empty(), "got {}", stdout(&output));
}

#[test]
fn malformed_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "a.ahk", CLEAN);
    fs::write(dir.path().join("ahk.toml"), "[lint\n").unwrap();
    let output = ahk(&["lint", arg(&script)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to parse config"));
}

#[test]
fn tokenize_prints_positions() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "t.ahk", "F1::MsgBox(1)");
    let output = ahk(&["tokenize", arg(&script)]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("1:1 HOTKEY \"F1::\"\n"), "got {text}");
}

#[test]
fn unterminated_string_fails_tokenize() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "s.ahk", "x := \"open\n");
    let output = ahk(&["tokenize", arg(&script)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unterminated string at line 2"));
}

#[test]
fn parse_json_and_exit_status() {
    let dir = TempDir::new().unwrap();
    let good = write_script(&dir, "good.ahk", CLEAN);
    let output = ahk(&["parse", arg(&good), "--format", "json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["program"]["type"], "Program");
    assert_eq!(json["errors"], serde_json::json!([]));

    let bad = write_script(&dir, "bad.ahk", "if (\nreturn 1");
    let output = ahk(&["parse", arg(&bad)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("parse error"));
}

#[test]
fn semantic_tokens_json() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "f.ahk", "Foo(x, y) {\n return x\n}");
    let output = ahk(&["semantic-tokens", arg(&script), "--format", "json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["tokenType"], "function");
    assert_eq!(json[0]["line"], 0);
}

#[test]
fn analyze_survives_lexical_failure() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "s.ahk", "x := \"open");
    let output = ahk(&["analyze", arg(&script)]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tokens"]["success"], false);
    assert_eq!(json["diagnostics"]["success"], true);
    assert_eq!(json["diagnostics"]["data"][0]["code"], "ParseError");
}

#[test]
fn stats_text_and_json() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "c.ahk", CLEAN);
    let output = ahk(&["stats", arg(&script)]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("functions: 1\n"));

    let output = ahk(&["stats", arg(&script), "--format", "json"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["lines"], 8);
}

#[test]
fn missing_file_fails() {
    let output = ahk(&["lint", "/nonexistent/dir/script.ahk"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("does not exist"));
}

#[test]
fn unknown_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let script = write_script(&dir, "c.ahk", CLEAN);
    let output = ahk(&["lint", arg(&script), "--format", "yaml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("expected 'text' or 'json'"));
}
