//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("repo-corpus"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Small repository covering every tier plus an excluded directory.
fn sample_repo(tmp: &TempDir) -> PathBuf {
    let root = tmp.path().join("demo");
    let write = |rel: &str, content: &str| {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    };
    write("README.md", "# Demo\n");
    write("src/app.py", "print('hi')\n");
    write("config.yml", "debug: true\n");
    write("docs/guide.md", "Guide\n");
    write("web/style.css", "body {}\n");
    write("node_modules/lib/index.js", "module.exports = 1;\n");
    root
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success().stdout(predicate::str::contains("repo-corpus"));
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("analyze"));
}

#[test]
fn test_build_writes_prioritized_corpus() {
    let tmp = TempDir::new().unwrap();
    let root = sample_repo(&tmp);
    let output = tmp.path().join("out/demo.md");

    cmd()
        .args(["build", root.to_str().unwrap(), "--output", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files included: 5"))
        .stdout(predicate::str::contains("Complete: yes"));

    let doc = read(&output);
    assert!(doc.starts_with("# Repository: demo\n\nGenerated: "));
    assert!(!doc.contains("node_modules"));

    let order: Vec<&str> = doc
        .lines()
        .filter_map(|line| line.strip_prefix("### "))
        .collect();
    similar_asserts::assert_eq!(
        order,
        vec!["README.md", "src/app.py", "config.yml", "docs/guide.md", "web/style.css"]
    );
}

#[test]
fn test_build_respects_byte_budget() {
    let tmp = TempDir::new().unwrap();
    let root = sample_repo(&tmp);
    let output = tmp.path().join("small.md");

    cmd()
        .args(["build", root.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .args(["--max-bytes", "250"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Complete: no"));

    assert!(read(&output).ends_with("**Note**: Size limit reached. Not all files included.\n"));
}

#[test]
fn test_build_derives_output_name_and_report() {
    let tmp = TempDir::new().unwrap();
    let root = sample_repo(&tmp);
    let out_dir = tmp.path().join("corpora");
    let report = tmp.path().join("report.json");

    cmd()
        .args(["build", root.to_str().unwrap()])
        .args(["--output-dir", out_dir.to_str().unwrap()])
        .args(["--report", report.to_str().unwrap(), "--no-timestamp"])
        .args(["--exclude-dir", "web"])
        .assert()
        .success();

    let names: Vec<String> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("demo_corpus_") && names[0].ends_with("Z.md"));

    let value: serde_json::Value = serde_json::from_str(&read(&report)).unwrap();
    assert_eq!(value["repository"], "demo");
    assert_eq!(value["file_count"], 4);
    assert_eq!(value["is_complete"], true);
    assert!(value.get("generated_at").is_none());
}

#[test]
fn test_build_missing_path_fails() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(["build", tmp.path().join("nope").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Repository source not found"));
}

#[test]
fn test_build_uses_discovered_config() {
    let tmp = TempDir::new().unwrap();
    let root = sample_repo(&tmp);
    fs::write(root.join("repo-corpus.toml"), "include_extensions = ['.py']\n").unwrap();
    let output = tmp.path().join("py.md");

    cmd()
        .args(["build", root.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files included: 2"));

    let doc = read(&output);
    assert!(doc.contains("### README.md"));
    assert!(doc.contains("### src/app.py"));
    assert!(!doc.contains("### config.yml"));
}

#[test]
fn test_info_lists_tiers_without_writing() {
    let tmp = TempDir::new().unwrap();
    let root = sample_repo(&tmp);

    cmd()
        .args(["info", root.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Repository: demo"))
        .stdout(predicate::str::contains("README.md [tier 1 (root docs)]"))
        .stdout(predicate::str::contains("web/style.css [tier 5 (frontend assets)]"))
        .stdout(predicate::str::contains("Files included: 5"));

    let written = fs::read_dir(&root)
        .unwrap()
        .filter(|e| e.as_ref().unwrap().file_name().to_string_lossy().contains("_corpus_"))
        .count();
    assert_eq!(written, 0);
}

#[test]
fn test_sync_copies_fixture_and_builds() {
    let tmp = TempDir::new().unwrap();
    let fixture = tmp.path().join("fixtures/demo");
    fs::create_dir_all(&fixture).unwrap();
    fs::write(fixture.join("main.go"), "package main\n").unwrap();

    cmd()
        .current_dir(tmp.path())
        .env("REPO_CORPUS_MIRROR__FIXTURE_ROOT", tmp.path().join("fixtures"))
        .args(["sync", "--name", "Demo-main", "--namespace", "team"])
        .args(["--download-root", tmp.path().join("repos").to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"file_count\": 1"))
        .stdout(predicate::str::contains("\"is_complete\": true"));

    assert!(tmp.path().join("repos/team/Demo-main/main.go").is_file());
}

#[test]
fn test_analyze_with_mock_backend() {
    let tmp = TempDir::new().unwrap();
    let root = sample_repo(&tmp);

    cmd()
        .args(["analyze", root.to_str().unwrap(), "--prompt", "REST API review"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"prompt_text_snapshot\": \"REST API review\""))
        .stdout(predicate::str::contains("\"score_pct\": 70"));
}
