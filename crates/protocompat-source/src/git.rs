//! Version retrieval from a git working tree.
//!
//! Uses the `git` CLI via `std::process::Command`. File content at a revision
//! is read from the child's stdout; nothing is written to disk.

use crate::errors::{file_not_in_revision, git_error, io_error, revision_not_found, Result};
use protocompat_core::{log_op_end, log_op_error, log_op_start};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// A git working tree, addressed by any directory inside it.
///
/// Paths passed to and returned from this type are relative to `repo_dir`.
#[derive(Debug, Clone)]
pub struct GitSource {
    repo_dir: PathBuf,
}

impl GitSource {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    /// Resolve `rev` to a commit hash.
    ///
    /// # Errors
    /// `RevisionNotFound` if `rev` does not name a commit, `ExternalService`
    /// if git cannot be run.
    pub fn verify_revision(&self, rev: &str) -> Result<String> {
        log_op_start!("verify_revision", revision = rev);
        let start = std::time::Instant::now();

        let commit = format!("{}^{{commit}}", rev);
        let result = self
            .git("verify_revision", &["rev-parse", "--verify", "--quiet", &commit])
            .and_then(|output| {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
                } else {
                    Err(revision_not_found(rev))
                }
            });

        match &result {
            Ok(_) => {
                log_op_end!(
                    "verify_revision",
                    duration_ms = start.elapsed().as_millis() as u64,
                    revision = rev
                );
            }
            Err(e) => {
                log_op_error!(
                    "verify_revision",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    revision = rev
                );
            }
        }
        result
    }

    /// Files changed between `rev` and the working tree whose extension is
    /// one of `extensions`. Files deleted from the working tree are skipped.
    ///
    /// # Errors
    /// As [`GitSource::verify_revision`].
    pub fn changed_files(&self, rev: &str, extensions: &[&str]) -> Result<Vec<String>> {
        self.verify_revision(rev)?;

        let output = self.git("changed_files", &["diff", "--name-only", "--relative", rev, "--"])?;
        if !output.status.success() {
            return Err(git_error("changed_files", stderr_of(&output)));
        }

        let files = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| has_extension(line, extensions))
            .filter(|line| self.repo_dir.join(line).is_file())
            .map(str::to_string)
            .collect();
        Ok(files)
    }

    /// Content of `path` at `rev`.
    ///
    /// # Errors
    /// `RevisionNotFound` for an unknown revision, `NotFound` if `path` did
    /// not exist at `rev`.
    pub fn show_file(&self, rev: &str, path: &str) -> Result<Vec<u8>> {
        // `./` makes the path relative to repo_dir rather than the repository root.
        let spec = format!("{}:./{}", rev, path);
        let output = self.git("show_file", &["show", &spec])?;
        if output.status.success() {
            return Ok(output.stdout);
        }

        self.verify_revision(rev)?;
        Err(file_not_in_revision(rev, path))
    }

    /// Current working-tree content of `path`.
    ///
    /// # Errors
    /// `Io` if the file cannot be read.
    pub fn read_working_file(&self, path: &str) -> Result<Vec<u8>> {
        std::fs::read(self.repo_dir.join(path)).map_err(|e| io_error("read_working_file", path, e))
    }

    fn git(&self, op: &str, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|e| git_error(op, format!("failed to run git: {}", e)))
    }
}

/// Check if git is available on the system.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn has_extension(path: &str, extensions: &[&str]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
