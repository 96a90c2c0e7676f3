#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::test_message;
use protocompat_core::{
    compare_snapshots, render_human_summary, CompareOptions, Field, FieldKind, FileStatus,
    FindingKind, Message, PackageGrouping, SchemaFile, Snapshot, Verdict,
};

fn two_file_package(second: Message) -> Snapshot {
    Snapshot::new(vec![
        SchemaFile::new("p/a.proto", "p").with_message(test_message()),
        SchemaFile::new("p/b.proto", "p").with_message(second),
    ])
}

#[test]
fn test_package_removed_references_previous_file() {
    let prev = Snapshot::new(vec![SchemaFile::new("p/only.proto", "p")]);
    let curr = Snapshot::new(vec![SchemaFile::new("q/other.proto", "q")]);

    let report = compare_snapshots(&prev, &curr, &CompareOptions::default());

    let findings: Vec<String> = report.findings().map(|f| f.to_string()).collect();
    assert_eq!(
        findings,
        vec![r#"Package "p" was removed (file "p/only.proto")"#]
    );
    assert_eq!(report.verdict, Verdict::Breaking);
}

#[test]
fn test_union_grouping_sees_every_file_of_a_package() {
    let prev = two_file_package(Message::new("Other").with_field(Field::new("x", 1, FieldKind::Bool)));
    let curr = two_file_package(Message::new("Other"));

    let report = compare_snapshots(&prev, &curr, &CompareOptions::default());

    assert_eq!(report.finding_count(), 1);
    let finding = report.findings().next().unwrap();
    assert_eq!(finding.kind(), FindingKind::FieldRemoved);
    assert_eq!(finding.file, "p/b.proto");
    assert_eq!(report.files[1].status, FileStatus::Breaking);
}

#[test]
fn test_representative_grouping_ignores_sibling_files() {
    let prev = two_file_package(Message::new("Other").with_field(Field::new("x", 1, FieldKind::Bool)));
    let curr = two_file_package(Message::new("Other"));
    let options = CompareOptions {
        package_grouping: PackageGrouping::Representative,
        ..CompareOptions::default()
    };

    let report = compare_snapshots(&prev, &curr, &options);

    assert_eq!(report.finding_count(), 0);
    assert_eq!(report.verdict, Verdict::Clean);
}

#[test]
fn test_message_moved_between_files_of_a_package_is_clean_under_union() {
    let prev = Snapshot::new(vec![
        SchemaFile::new("p/a.proto", "p").with_message(test_message()),
        SchemaFile::new("p/b.proto", "p"),
    ]);
    let curr = Snapshot::new(vec![
        SchemaFile::new("p/a.proto", "p"),
        SchemaFile::new("p/b.proto", "p").with_message(test_message()),
    ]);

    let report = compare_snapshots(&prev, &curr, &CompareOptions::default());
    assert_eq!(report.verdict, Verdict::Clean);
}

#[test]
fn test_duplicate_across_files_marks_package_as_error() {
    let prev = Snapshot::new(vec![SchemaFile::new("p/a.proto", "p").with_message(test_message())]);
    let curr = Snapshot::new(vec![
        SchemaFile::new("p/a.proto", "p").with_message(test_message()),
        SchemaFile::new("p/b.proto", "p").with_message(test_message()),
    ]);

    let report = compare_snapshots(&prev, &curr, &CompareOptions::default());

    assert_eq!(report.verdict, Verdict::Incomplete);
    assert_eq!(report.errors[0].code, "ERR_DUPLICATE_IDENTITY");
    assert!(report.files.iter().all(|f| f.status == FileStatus::Error));
    assert_eq!(report.finding_count(), 0);
}

#[test]
fn test_current_only_package_is_clean() {
    let prev = Snapshot::default();
    let curr = Snapshot::new(vec![SchemaFile::new("new.proto", "fresh").with_message(test_message())]);

    let report = compare_snapshots(&prev, &curr, &CompareOptions::default());
    assert_eq!(report.verdict, Verdict::Clean);
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].status, FileStatus::Clean);
}

#[test]
fn test_report_json_is_deterministic() {
    let prev = two_file_package(Message::new("Other").with_field(Field::new("x", 1, FieldKind::Bool)));
    let curr = two_file_package(Message::new("Other"));

    let first = compare_snapshots(&prev, &curr, &CompareOptions::default())
        .to_json_pretty()
        .unwrap();
    let second = compare_snapshots(&prev.clone(), &curr.clone(), &CompareOptions::default())
        .to_json_pretty()
        .unwrap();

    assert_eq!(first, second);
    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(value["report_schema_version"], 1);
    assert_eq!(value["verdict"], "breaking");
    assert_eq!(value["files"][1]["findings"][0]["kind"], "field-removed");
    assert_eq!(value["files"][1]["findings"][0]["number"], 1);
}

#[test]
fn test_human_summary_lists_files_in_order() {
    let prev = two_file_package(Message::new("Other").with_field(Field::new("x", 1, FieldKind::Bool)));
    let curr = two_file_package(Message::new("Other"));

    let summary = render_human_summary(&compare_snapshots(&prev, &curr, &CompareOptions::default()));

    assert_eq!(
        summary,
        "No breaking changes detected in p/a.proto\n\
         Detected 1 breaking changes in p/b.proto:\n\
         \x20 - Field \"x\" (number 1) was removed from message \"Other\"\n\
         Result: 1 breaking changes\n"
    );
}
