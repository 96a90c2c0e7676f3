//! Compare two snapshot files

use clap::Args;
use protocompat_core::{compare_snapshots, render_human_summary, Verdict};
use protocompat_source::load_snapshot;
use std::path::PathBuf;

use super::{GlobalArgs, OutputFormat};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Snapshot of the previous schema version
    #[arg(long)]
    pub previous: PathBuf,

    /// Snapshot of the current schema version
    #[arg(long)]
    pub current: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn execute(global: &GlobalArgs, args: CompareArgs) -> Result<Verdict, Box<dyn std::error::Error>> {
    let options = global.compare_options()?;
    let prev = load_snapshot(&args.previous)?;
    let curr = load_snapshot(&args.current)?;

    let report = compare_snapshots(&prev, &curr, &options);

    match args.format {
        OutputFormat::Text => print!("{}", render_human_summary(&report)),
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
    }

    Ok(report.verdict)
}
