//! protocompat source - descriptor loading and version retrieval
//!
//! Provides:
//! - Binary `FileDescriptorSet` decoding via prost
//! - JSON/YAML descriptor documents
//! - Extension-dispatched snapshot loading
//! - Git-backed retrieval of files at a past revision

pub mod descriptor_set;
pub mod document;
pub mod errors;
pub mod git;
pub mod snapshot;

// Re-export key types
pub use descriptor_set::decode_descriptor_set;
pub use document::{parse_document_file, parse_document_str, DescriptorDocument, DocumentFormat};
pub use errors::Result;
pub use git::GitSource;
pub use snapshot::{load_snapshot, load_snapshot_bytes, snapshot_extensions, SnapshotFormat};
