//! Package orchestrator.
//!
//! Groups the files of both snapshots by package, compares each package
//! present on both sides, and assembles a [`CompareReport`]. A package group
//! that cannot be compared contributes zero findings and an error entry; the
//! remaining groups proceed.

use crate::compare::{compare_enums, compare_messages, compare_services};
use crate::descriptor::{SchemaFile, Snapshot};
use crate::errors::ExError;
use crate::finding::{Change, Finding};
use crate::namespace::Namespace;
use crate::options::{CompareOptions, PackageGrouping};
use crate::report::{CompareReport, ErrorEntry, FileReport, FileStatus, ReportIdentity};
use crate::validation::validate_file;
use crate::{log_op_end, log_op_start};
use std::collections::{BTreeMap, BTreeSet};

/// Compare one file-pair.
///
/// Findings are concatenated in the order messages, enums, services. All
/// findings carry the previous file's package.
///
/// # Errors
/// Either file fails validation.
pub fn compare_files(prev: &SchemaFile, curr: &SchemaFile) -> Result<Vec<Finding>, ExError> {
    let (p, c) = build_namespaces(&[prev], &[curr])?;
    Ok(compare_namespaces(&prev.package, &p, &c))
}

/// Compare two snapshots package by package.
///
/// Never fails: invalid package groups are recorded in the report and the
/// verdict degrades to `Incomplete` when nothing else is breaking.
pub fn compare_snapshots(
    prev: &Snapshot,
    curr: &Snapshot,
    options: &CompareOptions,
) -> CompareReport {
    log_op_start!(
        "compare_snapshots",
        prev_files = prev.files.len(),
        curr_files = curr.files.len(),
        package_grouping = options.package_grouping.as_str()
    );
    let start = std::time::Instant::now();

    let prev_groups = group_by_package(prev);
    let curr_groups = group_by_package(curr);

    let mut findings: Vec<Finding> = Vec::new();
    let mut errors: Vec<ErrorEntry> = Vec::new();
    let mut errored: BTreeSet<&str> = BTreeSet::new();

    for (package, prev_files) in &prev_groups {
        let Some(curr_files) = curr_groups.get(package) else {
            findings.extend(prev_files.iter().map(|file| {
                Finding::new(
                    file.path.as_str(),
                    *package,
                    Change::PackageRemoved {
                        package_name: package.to_string(),
                    },
                )
            }));
            continue;
        };

        let (prev_sel, curr_sel) = match options.package_grouping {
            PackageGrouping::Union => (&prev_files[..], &curr_files[..]),
            PackageGrouping::Representative => (&prev_files[..1], &curr_files[..1]),
        };

        match build_namespaces(prev_sel, curr_sel) {
            Ok((p, c)) => findings.extend(compare_namespaces(package, &p, &c)),
            Err(err) => {
                tracing::warn!(
                    package = *package,
                    file_path = err.path().unwrap_or_default(),
                    err.code = err.code(),
                    "package could not be compared: {}",
                    err
                );
                errored.insert(*package);
                errors.push(ErrorEntry::from_error(*package, &err));
            }
        }
    }

    findings.retain(|f| !options.is_ignored(f.kind()));

    let files = file_reports(&prev_groups, &curr_groups, findings, &errored);
    let report = CompareReport::new(ReportIdentity::of(prev, curr), files, errors);

    log_op_end!(
        "compare_snapshots",
        duration_ms = start.elapsed().as_millis() as u64,
        finding_count = report.finding_count(),
        error_count = report.errors.len(),
        verdict = report.verdict.as_str()
    );

    report
}

/// Files of a snapshot grouped by package, in declaration order within each
/// group. Every group holds at least one file.
fn group_by_package(snapshot: &Snapshot) -> BTreeMap<&str, Vec<&SchemaFile>> {
    let mut groups: BTreeMap<&str, Vec<&SchemaFile>> = BTreeMap::new();
    for file in &snapshot.files {
        groups.entry(file.package.as_str()).or_default().push(file);
    }
    groups
}

fn build_namespaces<'a>(
    prev: &[&'a SchemaFile],
    curr: &[&'a SchemaFile],
) -> Result<(Namespace<'a>, Namespace<'a>), ExError> {
    for file in prev.iter().chain(curr) {
        validate_file(file).map_err(|e| ExError::from(e).with_op("validate_file"))?;
    }
    let p = Namespace::of_files(prev.iter().copied())?;
    let c = Namespace::of_files(curr.iter().copied())?;
    Ok((p, c))
}

fn compare_namespaces(package: &str, prev: &Namespace<'_>, curr: &Namespace<'_>) -> Vec<Finding> {
    let mut findings = compare_messages(package, &prev.messages, &curr.messages);
    findings.extend(compare_enums(package, &prev.enums, &curr.enums));
    findings.extend(compare_services(package, &prev.services, &curr.services));
    findings
}

/// One report per file seen on either side, ordered by package then path.
fn file_reports(
    prev_groups: &BTreeMap<&str, Vec<&SchemaFile>>,
    curr_groups: &BTreeMap<&str, Vec<&SchemaFile>>,
    findings: Vec<Finding>,
    errored: &BTreeSet<&str>,
) -> Vec<FileReport> {
    let mut reports: BTreeMap<(String, String), FileReport> = BTreeMap::new();

    for (package, files) in prev_groups.iter().chain(curr_groups) {
        for file in files {
            reports
                .entry((package.to_string(), file.path.clone()))
                .or_insert_with(|| FileReport {
                    path: file.path.clone(),
                    package: package.to_string(),
                    status: if errored.contains(package) {
                        FileStatus::Error
                    } else {
                        FileStatus::Clean
                    },
                    findings: Vec::new(),
                });
        }
    }

    for finding in findings {
        let key = (finding.package.clone(), finding.file.clone());
        if let Some(report) = reports.get_mut(&key) {
            report.status = FileStatus::Breaking;
            report.findings.push(finding);
        }
    }

    reports.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Field, FieldKind, Message};
    use crate::errors::ExErrorKind;
    use crate::finding::FindingKind;
    use crate::report::Verdict;

    fn user(kind: FieldKind) -> SchemaFile {
        SchemaFile::new("user.proto", "p")
            .with_message(Message::new("User").with_field(Field::new("id", 1, kind)))
    }

    #[test]
    fn test_compare_files_rejects_invalid_input() {
        let bad = SchemaFile::new("bad.proto", "p")
            .with_message(Message::new("User").with_field(Field::new("id", -1, FieldKind::Int32)));
        let err = compare_files(&bad, &user(FieldKind::Int32)).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidDescriptor);
        assert_eq!(err.op(), Some("validate_file"));
        assert_eq!(err.path(), Some("bad.proto"));
    }

    #[test]
    fn test_compare_files_is_idempotent() {
        let file = user(FieldKind::Int32);
        assert!(compare_files(&file, &file).unwrap().is_empty());
    }

    #[test]
    fn test_removed_package_reported_per_file() {
        let prev = Snapshot::new(vec![
            SchemaFile::new("p/a.proto", "p"),
            SchemaFile::new("p/b.proto", "p"),
        ]);
        let report = compare_snapshots(&prev, &Snapshot::default(), &CompareOptions::default());
        let files: Vec<&str> = report.findings().map(|f| f.file.as_str()).collect();
        assert_eq!(files, vec!["p/a.proto", "p/b.proto"]);
        assert!(report
            .findings()
            .all(|f| f.kind() == FindingKind::PackageRemoved));
        assert_eq!(report.verdict, Verdict::Breaking);
    }

    #[test]
    fn test_ignored_kinds_do_not_count() {
        let prev = Snapshot::new(vec![user(FieldKind::Int32)]);
        let curr = Snapshot::new(vec![user(FieldKind::Int64)]);
        let options = CompareOptions {
            ignore: vec![FindingKind::FieldTypeChanged],
            ..CompareOptions::default()
        };
        let report = compare_snapshots(&prev, &curr, &options);
        assert_eq!(report.verdict, Verdict::Clean);
        assert_eq!(report.files[0].status, FileStatus::Clean);
    }

    #[test]
    fn test_error_group_does_not_stop_other_packages() {
        let broken = SchemaFile::new("q.proto", "q").with_message(Message::new(""));
        let prev = Snapshot::new(vec![user(FieldKind::Int32), broken.clone()]);
        let curr = Snapshot::new(vec![user(FieldKind::String), broken]);
        let report = compare_snapshots(&prev, &curr, &CompareOptions::default());

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].package, "q");
        assert_eq!(report.errors[0].code, "ERR_INVALID_DESCRIPTOR");
        assert_eq!(report.finding_count(), 1);
        let statuses: Vec<FileStatus> = report.files.iter().map(|f| f.status).collect();
        assert_eq!(statuses, vec![FileStatus::Breaking, FileStatus::Error]);
        assert_eq!(report.verdict, Verdict::Breaking);
    }
}
