//! Descriptor documents: a JSON or YAML rendition of the descriptor model.
//!
//! ```yaml
//! schema_version: 0
//! files:
//!   - path: acme/user.proto
//!     package: acme
//!     messages:
//!       - name: User
//!         fields:
//!           - { name: id, number: 1, kind: int64 }
//! ```

use crate::errors::{decode_error, io_error, unsupported_format, unsupported_version, Result};
use crate::snapshot::SnapshotFormat;
use protocompat_core::{SchemaFile, Snapshot};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Only supported document schema version.
pub const DOCUMENT_SCHEMA_VERSION: u32 = 0;

/// Top-level descriptor document structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorDocument {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    #[serde(default)]
    pub files: Vec<SchemaFile>,
}

impl DescriptorDocument {
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot::new(self.files)
    }
}

/// Textual encoding of a descriptor document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

/// Parse a document file; the format follows the extension.
///
/// # Errors
/// `Io` if the file cannot be read, `UnsupportedFormat` for unknown
/// extensions, plus every error of [`parse_document_str`].
pub fn parse_document_file(path: &Path) -> Result<DescriptorDocument> {
    let origin = path.display().to_string();
    let format = match SnapshotFormat::from_path(path)? {
        SnapshotFormat::Document(format) => format,
        SnapshotFormat::DescriptorSet => return Err(unsupported_format(&origin)),
    };
    let content = fs::read_to_string(path).map_err(|e| io_error("parse_document", &origin, e))?;

    parse_document_str(&origin, &content, format)
}

/// Parse a document from a string.
///
/// # Errors
/// `Decode` on malformed input, `UnsupportedSchemaVersion` when
/// `schema_version` is not 0.
pub fn parse_document_str(
    origin: &str,
    content: &str,
    format: DocumentFormat,
) -> Result<DescriptorDocument> {
    let document: DescriptorDocument = match format {
        DocumentFormat::Json => serde_json::from_str(content)
            .map_err(|e| decode_error("parse_document", origin, format!("JSON parse error: {}", e)))?,
        DocumentFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| decode_error("parse_document", origin, format!("YAML parse error: {}", e)))?,
    };

    if document.schema_version != DOCUMENT_SCHEMA_VERSION {
        return Err(unsupported_version(origin, document.schema_version));
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocompat_core::{Cardinality, ExErrorKind, FieldKind};

    #[test]
    fn test_yaml_defaults_fill_missing_collections() {
        let yaml = r#"
schema_version: 0
files:
  - path: acme/user.proto
    package: acme
    messages:
      - name: User
        fields:
          - { name: id, number: 1, kind: int64 }
          - { name: tags, number: 2, kind: string, cardinality: repeated }
"#;
        let doc = parse_document_str("inline.yaml", yaml, DocumentFormat::Yaml).unwrap();
        let user = &doc.files[0].messages[0];
        assert_eq!(user.fields[0].kind, FieldKind::Int64);
        assert_eq!(user.fields[0].cardinality, Cardinality::Singular);
        assert_eq!(user.fields[1].cardinality, Cardinality::Repeated);
        assert!(doc.files[0].services.is_empty());
    }

    #[test]
    fn test_reject_unknown_schema_version() {
        let err = parse_document_str("v.json", r#"{"schema_version": 1}"#, DocumentFormat::Json)
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::UnsupportedSchemaVersion);
        assert_eq!(err.path(), Some("v.json"));
    }

    #[test]
    fn test_unknown_field_kind_is_decode_error() {
        let json = r#"{"schema_version": 0, "files": [{"path": "a.proto", "messages": [
            {"name": "M", "fields": [{"name": "x", "number": 1, "kind": "varchar"}]}]}]}"#;
        let err = parse_document_str("bad.json", json, DocumentFormat::Json).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Decode);
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let doc = DescriptorDocument {
            schema_version: DOCUMENT_SCHEMA_VERSION,
            files: vec![SchemaFile::new("a.proto", "p")],
        };
        let json = serde_json::to_string(&doc).unwrap();
        let back = parse_document_str("a.json", &json, DocumentFormat::Json).unwrap();
        assert_eq!(back.into_snapshot(), doc.into_snapshot());
    }
}
