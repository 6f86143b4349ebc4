//! End-to-end conversion tests: real export-shaped trees run through the
//! binary, verifying the on-disk results.

use std::fs;

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use tempfile::tempdir;

fn obsidianize() -> Command {
    cargo_bin_cmd!("obsidianize")
}

#[test]
fn test_export_scenario_renames_and_rewrites() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::write(
        root.join("Page abcdef0123456.md"),
        "[Other Page](Other%20Page%20fedcba9876543.md)",
    )
    .unwrap();
    fs::create_dir(root.join("Sub abcdef")).unwrap();

    obsidianize().arg(root).assert().success();

    assert!(root.join("Page.md").exists());
    assert_eq!(
        fs::read_to_string(root.join("Page.md")).unwrap(),
        "[[Other Page]]"
    );
    assert!(root.join("Sub").is_dir());
    assert!(!root.join("Sub abcdef").exists());
}

#[test]
fn test_external_urls_survive_conversion() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    let body = "[Rust](https://www.rust-lang.org/) and [Page](Page%20abc.md)\n";
    fs::write(root.join("Links abc.md"), body).unwrap();

    obsidianize().arg(root).assert().success();

    let rewritten = fs::read_to_string(root.join("Links.md")).unwrap();
    assert!(rewritten.contains("[Rust](https://www.rust-lang.org/)"));
    assert!(rewritten.contains("[[Page]]"));
}

#[test]
fn test_csv_produces_sibling_markdown_table() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::write(
        root.join("Tasks abc123.csv"),
        "Name,Link\nAlpha,Other%20Page%20xyz.md",
    )
    .unwrap();

    obsidianize().arg(root).assert().success();

    assert_eq!(
        fs::read_to_string(root.join("Tasks.csv")).unwrap(),
        "Name,Link\nAlpha,[[Other Page]]"
    );
    assert_eq!(
        fs::read_to_string(root.join("Tasks.md")).unwrap(),
        "Name|Link\n-|-|\nAlpha|[[Other Page]]"
    );
}

#[test]
fn test_images_centralized_under_images_directory() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir(root.join("Shots abc123")).unwrap();
    fs::write(root.join("Shots abc123").join("screen one.png"), b"png").unwrap();
    fs::write(
        root.join("Gallery abc456.md"),
        "![screen](Shots%20abc123/screen%20one.png)",
    )
    .unwrap();

    obsidianize().arg(root).assert().success();

    assert!(root
        .join("Images")
        .join("Shots")
        .join("screen one.png")
        .exists());
    // the emptied source directory is pruned
    assert!(!root.join("Shots").exists());
    let body = fs::read_to_string(root.join("Gallery.md")).unwrap();
    assert_eq!(body, "![[/Images/Shots/screen one.png]]");
}

#[test]
fn test_nested_tree_is_fully_converted() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("Area abc").join("Topic def")).unwrap();
    fs::write(root.join("Index 123.md"), "Area%20abc/Page%20456.md").unwrap();
    fs::write(
        root.join("Area abc").join("Page 456.md"),
        "https://www.notion.so/Deep-Note-2d41ab7b61d14cec885357ab17d48536",
    )
    .unwrap();
    fs::write(
        root.join("Area abc").join("Topic def").join("Leaf 789.md"),
        "plain text, nothing linked",
    )
    .unwrap();

    let output = obsidianize()
        .arg(root)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    assert!(root.join("Index.md").exists());
    assert!(root.join("Area").join("Page.md").exists());
    assert!(root.join("Area").join("Topic").join("Leaf.md").exists());
    assert_eq!(
        fs::read_to_string(root.join("Area").join("Page.md")).unwrap(),
        "[[Deep Note]]"
    );

    let summary: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(summary["directories"], 2);
    assert_eq!(summary["files"], 3);
    assert_eq!(summary["markdown_links"], 2);
}

#[test]
fn test_non_markdown_files_left_alone() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::write(root.join("notes abc.txt"), "a%20b.md stays as bytes? no-").unwrap();

    obsidianize().arg(root).assert().success();

    // renamed, but content untouched
    assert_eq!(
        fs::read_to_string(root.join("notes.txt")).unwrap(),
        "a%20b.md stays as bytes? no-"
    );
}
