//! protocompat CLI
//!
//! Detects breaking changes between two versions of a protobuf-style schema.
//!
//! Exit codes: 0 clean, 1 breaking changes found, 2 error or incomplete run.

use clap::{Parser, Subcommand, ValueEnum};
use protocompat_core::logging_facility::{init, Profile};
use protocompat_core::Verdict;

mod cli_config;
mod commands;

#[derive(Debug, Parser)]
#[command(name = "protocompat")]
#[command(about = "protocompat - Schema breaking-change detection", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: commands::GlobalArgs,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Dev, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Dev,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two snapshot files
    Compare(commands::compare::CompareArgs),
    /// Compare changed snapshot files against a git revision
    Git(commands::git::GitArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Dev => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(&cli.global, args),
        Commands::Git(args) => commands::git::execute(&cli.global, args),
    };

    let code = match result {
        Ok(Verdict::Clean) => 0,
        Ok(Verdict::Breaking) => 1,
        Ok(Verdict::Incomplete) => 2,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };
    std::process::exit(code);
}
