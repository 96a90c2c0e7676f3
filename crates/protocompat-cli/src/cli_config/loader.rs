//! Config file discovery and loading for `.protocompat.toml`.
//!
//! An explicit `--config` path wins. Otherwise two locations are checked in
//! precedence order:
//! 1. `./.protocompat.toml` (project-local)
//! 2. `~/.config/protocompat.toml` (user-global)

use protocompat_core::{ExError, ExErrorKind};
use std::path::{Path, PathBuf};

use super::CliConfig;

const CONFIG_FILENAME: &str = ".protocompat.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "protocompat.toml";

/// Load CLI config.
///
/// An explicit path must exist and parse. A discovered file that fails to
/// parse is reported and defaults are used.
///
/// # Errors
/// `Config` when the explicit file cannot be read or parsed.
pub(crate) fn load_cli_config(explicit: Option<&Path>) -> Result<CliConfig, ExError> {
    if let Some(path) = explicit {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| config_error(path, format!("failed to read config: {}", e)))?;
        let config = toml::from_str(&contents)
            .map_err(|e| config_error(path, format!("failed to parse config: {}", e)))?;
        tracing::debug!(?path, "Loaded CLI config");
        return Ok(config);
    }

    if let Some(path) = find_config_file() {
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::debug!(?path, "Loaded CLI config");
                    return Ok(config);
                }
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to parse CLI config, using defaults");
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read CLI config, using defaults");
            }
        }
    }
    Ok(CliConfig::default())
}

fn config_error(path: &Path, message: String) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_cli_config")
        .with_path(path.display().to_string())
        .with_message(message)
}

/// Search for config file in precedence order.
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    if let Some(home) = home_dir() {
        let global = home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME);
        if global.is_file() {
            return Some(global);
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
