//! Console renderer for comparison reports.

use crate::report::model::{CompareReport, FileStatus, Verdict};

/// Render the plain-text console summary of a [`CompareReport`].
///
/// One block per file, then one line per error, then the verdict.
pub fn render_human_summary(report: &CompareReport) -> String {
    let mut out = String::new();

    for file in &report.files {
        match file.status {
            FileStatus::Clean => {
                out.push_str(&format!("No breaking changes detected in {}\n", file.path));
            }
            FileStatus::Breaking => {
                out.push_str(&format!(
                    "Detected {} breaking changes in {}:\n",
                    file.findings.len(),
                    file.path
                ));
                for finding in &file.findings {
                    out.push_str(&format!("  - {}\n", finding));
                }
            }
            FileStatus::Error => {
                out.push_str(&format!("Could not compare {}\n", file.path));
            }
        }
    }

    for error in &report.errors {
        out.push_str(&format!("Error in package {:?}: {}\n", error.package, error.message));
    }

    match report.verdict {
        Verdict::Clean => out.push_str("Result: no breaking changes\n"),
        Verdict::Breaking => out.push_str(&format!(
            "Result: {} breaking changes\n",
            report.finding_count()
        )),
        Verdict::Incomplete => {
            out.push_str("Result: incomplete, some files could not be compared\n")
        }
    }

    out
}
