//! Comparison report types.
//!
//! Collections are ordered by package, then path, so that identical inputs
//! serialize to identical bytes.

use crate::descriptor::Snapshot;
use crate::errors::ExError;
use crate::finding::{Finding, FindingKind};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::collections::BTreeMap;

/// Result of comparing two snapshots.
///
/// `report_schema_version` is always 1 for this implementation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareReport {
    /// Schema version of this report structure (always 1)
    pub report_schema_version: u32,
    /// Digests tying the report to its inputs
    pub identity: ReportIdentity,
    pub verdict: Verdict,
    /// One entry per schema file seen on either side
    pub files: Vec<FileReport>,
    /// Package groups that could not be compared
    pub errors: Vec<ErrorEntry>,
}

/// SHA-256 digests (hex) of the canonical JSON of both snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportIdentity {
    pub previous_digest: String,
    pub current_digest: String,
}

impl ReportIdentity {
    pub fn of(prev: &Snapshot, curr: &Snapshot) -> Self {
        Self {
            previous_digest: snapshot_digest(prev),
            current_digest: snapshot_digest(curr),
        }
    }
}

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every file-pair compared, no findings
    Clean,
    /// At least one finding
    Breaking,
    /// No findings, but at least one file-pair could not be compared
    Incomplete,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Clean => "clean",
            Verdict::Breaking => "breaking",
            Verdict::Incomplete => "incomplete",
        }
    }
}

/// Per-file outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Clean,
    Breaking,
    /// The file's package group could not be compared; no findings recorded
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileReport {
    pub path: String,
    pub package: String,
    pub status: FileStatus,
    pub findings: Vec<Finding>,
}

/// A package group (or a single snapshot, when loading failed upstream) that
/// contributed no findings because it could not be compared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEntry {
    pub package: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub path: Option<String>,
    /// Stable `ERR_*` code
    pub code: String,
    pub message: String,
}

impl ErrorEntry {
    pub fn from_error(package: impl Into<String>, err: &ExError) -> Self {
        Self {
            package: package.into(),
            path: err.path().map(str::to_string),
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl CompareReport {
    /// Assemble a report, deriving the verdict from its contents.
    pub fn new(identity: ReportIdentity, files: Vec<FileReport>, errors: Vec<ErrorEntry>) -> Self {
        let verdict = if files.iter().any(|f| !f.findings.is_empty()) {
            Verdict::Breaking
        } else if !errors.is_empty() || files.iter().any(|f| f.status == FileStatus::Error) {
            Verdict::Incomplete
        } else {
            Verdict::Clean
        };
        Self {
            report_schema_version: 1,
            identity,
            verdict,
            files,
            errors,
        }
    }

    /// All findings, in file order.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.files.iter().flat_map(|f| f.findings.iter())
    }

    pub fn finding_count(&self) -> usize {
        self.files.iter().map(|f| f.findings.len()).sum()
    }

    pub fn is_breaking(&self) -> bool {
        self.verdict == Verdict::Breaking
    }

    pub fn counts_by_kind(&self) -> BTreeMap<FindingKind, usize> {
        let mut counts = BTreeMap::new();
        for finding in self.findings() {
            *counts.entry(finding.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ExError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ExError::new(crate::errors::ExErrorKind::Serialization)
                .with_op("report_to_json")
                .with_message(e.to_string())
        })
    }
}

/// SHA-256 (hex) of the snapshot's canonical JSON.
pub fn snapshot_digest(snapshot: &Snapshot) -> String {
    let canonical = serde_json::to_string(snapshot).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Message, SchemaFile};
    use crate::finding::Change;

    fn identity() -> ReportIdentity {
        ReportIdentity::of(&Snapshot::default(), &Snapshot::default())
    }

    fn file(findings: Vec<Finding>, status: FileStatus) -> FileReport {
        FileReport {
            path: "a.proto".to_string(),
            package: "p".to_string(),
            status,
            findings,
        }
    }

    #[test]
    fn test_digest_is_hex_sha256_and_stable() {
        let snapshot =
            Snapshot::new(vec![SchemaFile::new("a.proto", "p").with_message(Message::new("User"))]);
        let digest = snapshot_digest(&snapshot);
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, snapshot_digest(&snapshot.clone()));
        assert_ne!(digest, snapshot_digest(&Snapshot::default()));
    }

    #[test]
    fn test_findings_win_over_errors() {
        let finding = Finding::new(
            "a.proto",
            "p",
            Change::MessageRemoved {
                message: "User".to_string(),
            },
        );
        let error = ErrorEntry {
            package: "q".to_string(),
            path: None,
            code: "ERR_DECODE".to_string(),
            message: "bad".to_string(),
        };
        let report = CompareReport::new(
            identity(),
            vec![file(vec![finding], FileStatus::Breaking)],
            vec![error],
        );
        assert_eq!(report.verdict, Verdict::Breaking);
        assert!(report.is_breaking());
        assert_eq!(report.counts_by_kind()[&FindingKind::MessageRemoved], 1);
    }

    #[test]
    fn test_errors_without_findings_are_incomplete() {
        let report = CompareReport::new(identity(), vec![file(vec![], FileStatus::Error)], vec![]);
        assert_eq!(report.verdict, Verdict::Incomplete);
        assert!(!report.is_breaking());
    }

    #[test]
    fn test_empty_report_is_clean() {
        let report = CompareReport::new(identity(), vec![], vec![]);
        assert_eq!(report.verdict, Verdict::Clean);
        assert_eq!(report.report_schema_version, 1);
        assert_eq!(report.finding_count(), 0);
    }
}
