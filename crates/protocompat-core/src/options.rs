//! Comparison options.

use crate::finding::FindingKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How files sharing a package are paired across snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageGrouping {
    /// All files of a package form one namespace on each side
    #[default]
    Union,
    /// Only the first-declared file of a package is compared on each side;
    /// its siblings are ignored
    Representative,
}

impl PackageGrouping {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageGrouping::Union => "union",
            PackageGrouping::Representative => "representative",
        }
    }
}

impl fmt::Display for PackageGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PackageGrouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "union" => Ok(PackageGrouping::Union),
            "representative" => Ok(PackageGrouping::Representative),
            other => Err(format!(
                "unknown package grouping '{}', expected 'union' or 'representative'",
                other
            )),
        }
    }
}

/// Options for a snapshot comparison run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CompareOptions {
    pub package_grouping: PackageGrouping,
    /// Finding kinds dropped after comparison
    pub ignore: Vec<FindingKind>,
}

impl CompareOptions {
    pub fn is_ignored(&self, kind: FindingKind) -> bool {
        self.ignore.contains(&kind)
    }
}
