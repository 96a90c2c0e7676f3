//! CLI configuration file.
//!
//! ```toml
//! [compare]
//! package-grouping = "union"
//! ignore = ["field-renamed", "enum-value-renamed"]
//! ```

pub(crate) mod loader;

pub(crate) use loader::load_cli_config;

use protocompat_core::CompareOptions;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Defaults for every comparison run; flags override them.
    #[serde(default)]
    pub compare: CompareOptions,
}
