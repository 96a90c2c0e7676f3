//! Subcommands and the flags they share.

pub mod compare;
pub mod git;

use crate::cli_config::load_cli_config;
use clap::{Args, ValueEnum};
use protocompat_core::{CompareOptions, FindingKind, PackageGrouping};
use std::path::PathBuf;

/// Flags accepted by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Config file (default: ./.protocompat.toml, then ~/.config/protocompat.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// How files sharing a package are compared: union or representative
    #[arg(long, global = true)]
    pub package_grouping: Option<PackageGrouping>,

    /// Finding kind to ignore, e.g. field-renamed (repeatable; replaces the config list)
    #[arg(long = "ignore", global = true)]
    pub ignore: Vec<FindingKind>,
}

impl GlobalArgs {
    /// Config file values with flag overrides applied.
    pub fn compare_options(&self) -> Result<CompareOptions, Box<dyn std::error::Error>> {
        let mut options = load_cli_config(self.config.as_deref())?.compare;
        if let Some(grouping) = self.package_grouping {
            options.package_grouping = grouping;
        }
        if !self.ignore.is_empty() {
            options.ignore = self.ignore.clone();
        }
        Ok(options)
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Console summary
    #[default]
    Text,
    /// Report as JSON
    Json,
}
