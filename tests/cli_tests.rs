//! Integration tests for the obsidianize CLI surface: flags, output formats,
//! and exit codes.

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::tempdir;

/// Get a Command for obsidianize
fn obsidianize() -> Command {
    cargo_bin_cmd!("obsidianize")
}

#[test]
fn test_help_flag() {
    obsidianize()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: obsidianize"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_version_flag() {
    obsidianize()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("obsidianize"));
}

#[test]
fn test_missing_export_root_exits_with_data_error() {
    obsidianize()
        .arg("/no/such/export")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("export root not found"));
}

#[test]
fn test_file_as_export_root_exits_with_data_error() {
    let tmp = tempdir().unwrap();
    let file = tmp.path().join("note.md");
    std::fs::write(&file, "plain").unwrap();

    obsidianize()
        .arg(&file)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_json_error_envelope() {
    let output = obsidianize()
        .args(["/no/such/export", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let envelope: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
    assert_eq!(envelope["error"]["code"], 3);
    assert_eq!(envelope["error"]["type"], "export_not_found");
}

#[test]
fn test_human_summary_shape() {
    let tmp = tempdir().unwrap();
    std::fs::write(tmp.path().join("Page abc123.md"), "no links here").unwrap();

    obsidianize()
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed in "))
        .stdout(predicate::str::contains("Directories: 0"))
        .stdout(predicate::str::contains("Files: 1"))
        .stdout(predicate::str::contains("Images: 0"))
        .stdout(predicate::str::contains("Markdown Links: 0"))
        .stdout(predicate::str::contains("CSV Links: 0"));
}

#[test]
fn test_json_summary_shape() {
    let tmp = tempdir().unwrap();
    std::fs::write(
        tmp.path().join("Page abc123.md"),
        "[Other Page](Other%20Page%20def456.md)",
    )
    .unwrap();

    let output = obsidianize()
        .arg(tmp.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let summary: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(summary["files"], 1);
    assert_eq!(summary["directories"], 0);
    assert_eq!(summary["markdown_links"], 1);
    assert!(summary["elapsed_ms"].is_u64());
}

#[test]
fn test_quiet_suppresses_summary() {
    let tmp = tempdir().unwrap();
    std::fs::write(tmp.path().join("Page abc123.md"), "no links").unwrap();

    obsidianize()
        .arg(tmp.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_interactive_prompt_reads_path_from_stdin() {
    let tmp = tempdir().unwrap();
    std::fs::write(tmp.path().join("Page abc123.md"), "no links").unwrap();

    obsidianize()
        .write_stdin(format!("{}\n", tmp.path().display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Notion export path:"))
        .stdout(predicate::str::contains("Files: 1"));
}

#[test]
fn test_empty_stdin_path_is_usage_error() {
    obsidianize()
        .write_stdin("\n")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("no export path given"));
}
