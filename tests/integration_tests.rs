//! Integration tests for the issue-import CLI
//!
//! These tests exercise the binary end-to-end using assert_cmd. None of them
//! reach GitHub: they stop at argument or configuration errors, run in dry-run
//! mode, or point the API base at a closed loopback port.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const UNREACHABLE_API: &str = "http://127.0.0.1:9";

const THREE_ROWS: &str = "\
ID,Title,Type,Priority,Estimate,ParentID,Description,Dependencies,Labels
P1,Epic,feature,P1,5,,Top level work,,backend
P2,Design,task,P2,,P1,Sketch it,,
P3,Build,task,P2,3,P1,Make it,P2,\"backend, api\"
";

/// Helper to get an issue-import command isolated from the user's config
fn issue_import(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("issue-import").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("GITHUB_REPOSITORY")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_API_URL")
        .env_remove("ISSUE_IMPORT_LABEL_COLOR");
    cmd
}

/// Helper to write the three-row CSV into a temp directory
fn write_csv(tmp: &TempDir, contents: &str) -> String {
    let path = tmp.path().join("issues.csv");
    fs::write(&path, contents).unwrap();
    path.display().to_string()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    issue_import(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub issues"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    issue_import(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("issue-import"));
}

#[test]
fn test_missing_csv_flag_fails() {
    let tmp = TempDir::new().unwrap();
    issue_import(&tmp)
        .args(["--milestone", "Sprint 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--csv"));
}

#[test]
fn test_template_output() {
    let tmp = TempDir::new().unwrap();
    issue_import(&tmp)
        .arg("--template")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "ID,Title,Type,Priority,Estimate,ParentID,Description,Dependencies,Labels\n",
        ))
        .stdout(predicate::str::contains("\"backend,frontend\""))
        .stderr(predicate::str::contains("Template generated"));
}

#[test]
fn test_completions_output() {
    let tmp = TempDir::new().unwrap();
    issue_import(&tmp)
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("issue-import"));
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_missing_environment_exits_1() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, THREE_ROWS);

    issue_import(&tmp)
        .args(["--csv", &csv, "--milestone", "Sprint 1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "GITHUB_REPOSITORY and GITHUB_TOKEN must be set",
        ))
        .stdout(predicate::str::contains("Loaded").not());
}

#[test]
fn test_missing_token_exits_1() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, THREE_ROWS);

    issue_import(&tmp)
        .env("GITHUB_REPOSITORY", "octo/widgets")
        .args(["--csv", &csv, "--milestone", "Sprint 1", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GITHUB_TOKEN must be set"));
}

#[test]
fn test_malformed_repository_exits_1() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, THREE_ROWS);

    issue_import(&tmp)
        .env("GITHUB_REPOSITORY", "widgets")
        .env("GITHUB_TOKEN", "secret")
        .args(["--csv", &csv, "--milestone", "Sprint 1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected <owner>/<name>"));
}

// ============================================================================
// Import Tests
// ============================================================================

#[test]
fn test_dry_run_reports_plan() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, THREE_ROWS);

    issue_import(&tmp)
        .env("GITHUB_REPOSITORY", "octo/widgets")
        .env("GITHUB_TOKEN", "secret")
        .env("GITHUB_API_URL", UNREACHABLE_API)
        .args(["--csv", &csv, "--milestone", "Sprint 1", "--dry-run", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 3 rows"))
        .stdout(predicate::str::contains(
            "[DRY RUN] would ensure milestone 'Sprint 1'",
        ))
        .stdout(predicate::str::contains(
            "[DRY RUN] Would create issue: Epic",
        ))
        .stdout(predicate::str::contains("DRY-P3"))
        .stdout(predicate::str::contains("Skipping linking"))
        .stdout(predicate::str::contains("Dry run complete"))
        .stderr(predicate::str::contains("0 API request(s)"));
}

#[test]
fn test_quiet_dry_run_hides_rows() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, THREE_ROWS);

    issue_import(&tmp)
        .env("GITHUB_REPOSITORY", "octo/widgets")
        .env("GITHUB_TOKEN", "secret")
        .env("GITHUB_API_URL", UNREACHABLE_API)
        .args(["--csv", &csv, "--milestone", "Sprint 1", "--dry-run", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create issue").not())
        .stdout(predicate::str::contains("Import Summary"));
}

#[test]
fn test_missing_csv_file_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.csv").display().to_string();

    issue_import(&tmp)
        .env("GITHUB_REPOSITORY", "octo/widgets")
        .env("GITHUB_TOKEN", "secret")
        .args(["--csv", &missing, "--milestone", "Sprint 1", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load"));
}

#[test]
fn test_unreachable_api_aborts() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(&tmp, THREE_ROWS);

    issue_import(&tmp)
        .env("GITHUB_REPOSITORY", "octo/widgets")
        .env("GITHUB_TOKEN", "secret")
        .env("GITHUB_API_URL", UNREACHABLE_API)
        .args(["--csv", &csv, "--milestone", "Sprint 1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Loaded 3 rows"))
        .stdout(predicate::str::contains("Created").not())
        .stderr(predicate::str::contains("aborted"));
}
