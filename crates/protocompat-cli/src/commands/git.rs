//! Compare working-tree snapshot files against a git revision

use clap::Args;
use protocompat_core::{
    compare_snapshots, render_human_summary, CompareOptions, CompareReport, ExErrorKind,
    Snapshot, Verdict,
};
use protocompat_source::{load_snapshot_bytes, snapshot_extensions, GitSource};
use serde::Serialize;
use std::path::PathBuf;

use super::{GlobalArgs, OutputFormat};

#[derive(Debug, Args)]
pub struct GitArgs {
    /// Revision to compare against (e.g. HEAD~1, a branch, a commit hash)
    #[arg(long, default_value = "HEAD")]
    pub commit: String,

    /// Directory inside the repository; paths are relative to it
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Snapshot files to compare (default: every changed snapshot file)
    pub paths: Vec<String>,
}

/// Outcome for one snapshot file.
#[derive(Debug, Serialize)]
struct SnapshotRun {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<CompareReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct GitRunReport {
    revision: String,
    verdict: Verdict,
    snapshots: Vec<SnapshotRun>,
}

pub fn execute(global: &GlobalArgs, args: GitArgs) -> Result<Verdict, Box<dyn std::error::Error>> {
    let options = global.compare_options()?;
    let source = GitSource::new(args.repo.clone());

    source.verify_revision(&args.commit)?;

    let paths = if args.paths.is_empty() {
        source.changed_files(&args.commit, &snapshot_extensions())?
    } else {
        args.paths.clone()
    };

    if matches!(args.format, OutputFormat::Text) {
        if paths.is_empty() {
            println!("No modified snapshot files found");
        } else {
            println!(
                "Found {} modified snapshot files compared to {}",
                paths.len(),
                args.commit
            );
        }
    }

    let mut runs = Vec::new();
    for path in paths {
        let run = match compare_path(&source, &args.commit, &path, &options) {
            Ok(report) => SnapshotRun {
                path,
                report: Some(report),
                error: None,
            },
            Err(e) => {
                tracing::warn!(file_path = path.as_str(), error = %e, "snapshot could not be compared");
                SnapshotRun {
                    path,
                    report: None,
                    error: Some(e.to_string()),
                }
            }
        };
        if matches!(args.format, OutputFormat::Text) {
            print_run(&run, &args.commit);
        }
        runs.push(run);
    }

    let verdict = overall_verdict(&runs);
    if matches!(args.format, OutputFormat::Json) {
        let report = GitRunReport {
            revision: args.commit,
            verdict,
            snapshots: runs,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(verdict)
}

fn compare_path(
    source: &GitSource,
    rev: &str,
    path: &str,
    options: &CompareOptions,
) -> Result<CompareReport, Box<dyn std::error::Error>> {
    // A snapshot file added since `rev` has nothing to break.
    let prev = match source.show_file(rev, path) {
        Ok(bytes) => load_snapshot_bytes(path, &bytes)?,
        Err(e) if e.kind() == ExErrorKind::NotFound => Snapshot::default(),
        Err(e) => return Err(e.into()),
    };
    let curr = load_snapshot_bytes(path, &source.read_working_file(path)?)?;

    Ok(compare_snapshots(&prev, &curr, options))
}

fn print_run(run: &SnapshotRun, rev: &str) {
    println!("Analyzing changes in {} against {}...", run.path, rev);
    match (&run.report, &run.error) {
        (Some(report), _) => print!("{}", render_human_summary(report)),
        (None, Some(error)) => println!("Error processing {}: {}", run.path, error),
        (None, None) => {}
    }
}

/// Breaking wins; any snapshot that failed or was incomplete makes the run
/// incomplete.
fn overall_verdict(runs: &[SnapshotRun]) -> Verdict {
    let mut verdict = Verdict::Clean;
    for run in runs {
        match run.report.as_ref().map(|r| r.verdict) {
            Some(Verdict::Breaking) => return Verdict::Breaking,
            Some(Verdict::Clean) => {}
            Some(Verdict::Incomplete) | None => verdict = Verdict::Incomplete,
        }
    }
    verdict
}
