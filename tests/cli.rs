// ABOUTME: Integration tests for the gitship CLI.
// ABOUTME: Validates --help, argument validation, exit codes and --history output.

use assert_cmd::Command;
use gitship::history::{DeployRecord, HistoryLog};
use gitship::types::{BranchName, Revision};
use predicates::prelude::*;

fn gitship_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("gitship"))
}

fn record(branch: &str, commit: &str) -> DeployRecord {
    DeployRecord::now(
        BranchName::new(branch).unwrap(),
        Revision::parse(commit).unwrap(),
        "alice@web01",
    )
}

#[test]
fn help_shows_flags() {
    gitship_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--history"))
        .stdout(predicate::str::contains("--skip-public-check"))
        .stdout(predicate::str::contains("--app-dir"))
        .stdout(predicate::str::contains("[BRANCH]"));
}

#[test]
fn invalid_branch_is_rejected_before_anything_runs() {
    let temp_dir = tempfile::tempdir().unwrap();

    gitship_cmd()
        .arg("--app-dir")
        .arg(temp_dir.path())
        .arg("bad..branch")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid branch name"));

    assert!(!temp_dir.path().join("deploy-history.log").exists());
}

#[test]
fn invalid_host_is_rejected() {
    gitship_cmd()
        .args(["main", "not a host"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid health host"));
}

#[test]
fn non_repository_fails_preflight_without_side_effects() {
    let temp_dir = tempfile::tempdir().unwrap();

    gitship_cmd()
        .arg("--app-dir")
        .arg(temp_dir.path())
        .arg("--skip-public-check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error"));

    let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
    assert!(leftovers.is_empty(), "preflight must not write anything");
}

#[test]
fn history_on_fresh_host_is_empty() {
    let temp_dir = tempfile::tempdir().unwrap();

    gitship_cmd()
        .arg("--app-dir")
        .arg(temp_dir.path())
        .arg("--history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No deploys recorded"));
}

#[test]
fn history_on_truncated_log_is_empty() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("deploy-history.log"), "").unwrap();

    gitship_cmd()
        .arg("--app-dir")
        .arg(temp_dir.path())
        .arg("--history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No deploys recorded"));
}

#[test]
fn history_lists_newest_records() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log = HistoryLog::new(temp_dir.path().join("deploy-history.log"));
    log.append(&record("main", "aaaaaaa111")).unwrap();
    log.append(&record("release-42", "bbbbbbb222")).unwrap();

    gitship_cmd()
        .arg("--app-dir")
        .arg(temp_dir.path())
        .args(["--history", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("release-42"))
        .stdout(predicate::str::contains("bbbbbbb"))
        .stdout(predicate::str::contains("alice@web01"))
        .stdout(predicate::str::contains("aaaaaaa").not());
}

#[test]
fn history_json_emits_one_record_per_line() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log = HistoryLog::new(temp_dir.path().join("deploy-history.log"));
    log.append(&record("main", "aaaaaaa111")).unwrap();
    log.append(&record("main", "bbbbbbb222")).unwrap();

    let output = gitship_cmd()
        .arg("--app-dir")
        .arg(temp_dir.path())
        .args(["--history", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["commit"], "bbbbbbb222");
    assert_eq!(lines[1]["branch"], "main");
}
