//! Snapshot loading, dispatched on file extension.

use crate::descriptor_set::decode_descriptor_set;
use crate::document::{parse_document_str, DocumentFormat};
use crate::errors::{decode_error, io_error, unsupported_format, Result};
use protocompat_core::{log_op_end, log_op_error, log_op_start, Snapshot};
use std::path::Path;

/// Extensions recognised as binary descriptor sets.
pub const DESCRIPTOR_SET_EXTENSIONS: &[&str] = &["pb", "binpb", "desc", "fds"];

/// Extensions recognised as descriptor documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Every extension [`load_snapshot`] accepts.
pub fn snapshot_extensions() -> Vec<&'static str> {
    DESCRIPTOR_SET_EXTENSIONS
        .iter()
        .chain(DOCUMENT_EXTENSIONS)
        .copied()
        .collect()
}

/// Loader selected for a snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    DescriptorSet,
    Document(DocumentFormat),
}

impl SnapshotFormat {
    /// # Errors
    /// `UnsupportedFormat` for a missing or unknown extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            e if DESCRIPTOR_SET_EXTENSIONS.contains(&e) => Ok(SnapshotFormat::DescriptorSet),
            "json" => Ok(SnapshotFormat::Document(DocumentFormat::Json)),
            "yaml" | "yml" => Ok(SnapshotFormat::Document(DocumentFormat::Yaml)),
            _ => Err(unsupported_format(&path.display().to_string())),
        }
    }
}

/// Load a snapshot from disk.
///
/// # Errors
/// `UnsupportedFormat`, `Io`, `Decode` or `UnsupportedSchemaVersion`.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let origin = path.display().to_string();
    log_op_start!("load_snapshot", file_path = origin.as_str());
    let start = std::time::Instant::now();

    let result = SnapshotFormat::from_path(path).and_then(|format| {
        let bytes = std::fs::read(path).map_err(|e| io_error("load_snapshot", &origin, e))?;
        decode(&origin, format, &bytes)
    });

    match result {
        Ok(snapshot) => {
            if snapshot.is_empty() {
                tracing::warn!(file_path = origin.as_str(), "snapshot declares no schema files");
            }
            log_op_end!(
                "load_snapshot",
                duration_ms = start.elapsed().as_millis() as u64,
                file_path = origin.as_str(),
                file_count = snapshot.files.len()
            );
            Ok(snapshot)
        }
        Err(e) => {
            log_op_error!(
                "load_snapshot",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                file_path = origin.as_str()
            );
            Err(e)
        }
    }
}

/// Load a snapshot from in-memory content, such as a file retrieved from
/// history. `name` selects the loader exactly as a path would.
///
/// # Errors
/// As [`load_snapshot`], minus `Io`.
pub fn load_snapshot_bytes(name: &str, bytes: &[u8]) -> Result<Snapshot> {
    let format = SnapshotFormat::from_path(Path::new(name))?;
    decode(name, format, bytes)
}

fn decode(origin: &str, format: SnapshotFormat, bytes: &[u8]) -> Result<Snapshot> {
    match format {
        SnapshotFormat::DescriptorSet => decode_descriptor_set(origin, bytes),
        SnapshotFormat::Document(doc_format) => {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| decode_error("load_snapshot", origin, format!("not valid UTF-8: {}", e)))?;
            Ok(parse_document_str(origin, text, doc_format)?.into_snapshot())
        }
    }
}
