// Integration tests for git-backed version retrieval
//
// Each test builds a throwaway repository with the git CLI; tests return early
// when git is not installed.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use protocompat_core::ExErrorKind;
use protocompat_source::git::git_available;
use protocompat_source::{load_snapshot_bytes, snapshot_extensions, GitSource};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const V1: &str = r#"{"schema_version": 0, "files": [{"path": "users.proto", "package": "acme",
  "messages": [{"name": "User", "fields": [{"name": "id", "number": 1, "kind": "int64"}]}]}]}"#;
const V2: &str = r#"{"schema_version": 0, "files": [{"path": "users.proto", "package": "acme",
  "messages": [{"name": "User", "fields": [{"name": "id", "number": 1, "kind": "string"}]}]}]}"#;

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("git should run");
    assert!(status.success(), "git {:?} failed", args);
}

/// Repository with `schemas/users.json` and `README.md` committed at V1.
fn repo_with_commit() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "--quiet"]);
    git(dir.path(), &["config", "user.email", "test@example.com"]);
    git(dir.path(), &["config", "user.name", "Test"]);
    git(dir.path(), &["config", "commit.gpgsign", "false"]);
    std::fs::create_dir_all(dir.path().join("schemas")).unwrap();
    std::fs::write(dir.path().join("schemas/users.json"), V1).unwrap();
    std::fs::write(dir.path().join("README.md"), "v1").unwrap();
    git(dir.path(), &["add", "."]);
    git(dir.path(), &["commit", "--quiet", "-m", "v1"]);
    dir
}

#[test]
fn test_verify_revision_resolves_head() {
    if !git_available() {
        return;
    }
    let repo = repo_with_commit();
    let source = GitSource::new(repo.path());

    let hash = source.verify_revision("HEAD").unwrap();
    assert_eq!(hash.len(), 40);
}

#[test]
fn test_unknown_revision_is_distinct_error() {
    if !git_available() {
        return;
    }
    let repo = repo_with_commit();
    let source = GitSource::new(repo.path());

    let err = source.verify_revision("no-such-branch").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::RevisionNotFound);
    assert_eq!(err.revision(), Some("no-such-branch"));

    let err = source
        .changed_files("no-such-branch", &snapshot_extensions())
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::RevisionNotFound);
}

#[test]
fn test_changed_files_filters_by_extension() {
    if !git_available() {
        return;
    }
    let repo = repo_with_commit();
    std::fs::write(repo.path().join("schemas/users.json"), V2).unwrap();
    std::fs::write(repo.path().join("README.md"), "v2").unwrap();
    let source = GitSource::new(repo.path());

    let changed = source.changed_files("HEAD", &snapshot_extensions()).unwrap();
    assert_eq!(changed, vec!["schemas/users.json".to_string()]);
}

#[test]
fn test_show_file_reads_committed_content() {
    if !git_available() {
        return;
    }
    let repo = repo_with_commit();
    std::fs::write(repo.path().join("schemas/users.json"), V2).unwrap();
    let source = GitSource::new(repo.path());

    let old = source.show_file("HEAD", "schemas/users.json").unwrap();
    let new = source.read_working_file("schemas/users.json").unwrap();

    let prev = load_snapshot_bytes("schemas/users.json", &old).unwrap();
    let curr = load_snapshot_bytes("schemas/users.json", &new).unwrap();
    assert_ne!(prev, curr);
    assert_eq!(String::from_utf8(old).unwrap(), V1);
}

#[test]
fn test_show_file_missing_at_revision_is_not_found() {
    if !git_available() {
        return;
    }
    let repo = repo_with_commit();
    let source = GitSource::new(repo.path());

    let err = source.show_file("HEAD", "schemas/orders.json").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.path(), Some("schemas/orders.json"));
}

#[test]
fn test_paths_are_relative_to_subdirectory() {
    if !git_available() {
        return;
    }
    let repo = repo_with_commit();
    std::fs::write(repo.path().join("schemas/users.json"), V2).unwrap();
    let source = GitSource::new(repo.path().join("schemas"));

    let changed = source.changed_files("HEAD", &["json"]).unwrap();
    assert_eq!(changed, vec!["users.json".to_string()]);
    assert!(source.show_file("HEAD", "users.json").is_ok());
}
