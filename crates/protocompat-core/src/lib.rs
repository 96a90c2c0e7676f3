//! protocompat core - schema breaking-change detection engine
//!
//! This crate compares two already-resolved descriptor trees and reports
//! every change that breaks existing peers or generated code:
//! - Descriptor tree model and per-entity identity keys
//! - Namespace flattening of nested messages and enums
//! - Field, enum, service and message comparators
//! - Package orchestration, verdicts and deterministic reports
//!
//! Parsing and version retrieval live outside this crate; the engine has no
//! filesystem, process or environment dependencies.

pub mod compare;
pub mod descriptor;
pub mod errors;
pub mod finding;
pub mod logging_facility;
pub mod namespace;
pub mod options;
pub mod orchestrator;
pub mod report;
pub mod validation;

pub use protocompat_core_types::schema;

// Re-export commonly used types
pub use descriptor::{
    Cardinality, Enum, EnumValue, Field, FieldKind, Message, Method, SchemaFile, Service, Snapshot,
};
pub use errors::{ExError, ExErrorKind, ProtoCompatError, Result};
pub use finding::{Change, Finding, FindingKind, Severity, StreamSide};
pub use options::{CompareOptions, PackageGrouping};
pub use orchestrator::{compare_files, compare_snapshots};
pub use report::{render_human_summary, CompareReport, FileStatus, Verdict};
pub use validation::validate_file;
