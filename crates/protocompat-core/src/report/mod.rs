//! Comparison report.

pub mod human_summary;
pub mod model;

pub use human_summary::render_human_summary;
pub use model::{
    snapshot_digest, CompareReport, ErrorEntry, FileReport, FileStatus, ReportIdentity, Verdict,
};
