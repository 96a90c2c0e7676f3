//! Error handling for protocompat-source
//!
//! Wraps protocompat-core ExError with loader and retrieval helpers

use protocompat_core::errors::{ExError, ExErrorKind, ProtoCompatError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a decode error for descriptor bytes or documents
pub fn decode_error(op: &str, path: &str, reason: impl ToString) -> ExError {
    ExError::from(ProtoCompatError::Decode {
        path: path.to_string(),
        reason: reason.to_string(),
    })
    .with_op(op.to_string())
}

/// Create an unsupported schema version error
pub fn unsupported_version(path: &str, version: u32) -> ExError {
    ExError::from(ProtoCompatError::UnsupportedSchemaVersion { version })
        .with_op("parse_document")
        .with_path(path.to_string())
}

/// Create an unsupported format error
pub fn unsupported_format(path: &str) -> ExError {
    ExError::from(ProtoCompatError::UnsupportedFormat {
        path: path.to_string(),
    })
    .with_op("load_snapshot")
}

/// Create an IO error
pub fn io_error(operation: &str, path: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.to_string())
        .with_message(err.to_string())
}

/// Create an error for a failed external git invocation
pub fn git_error(operation: &str, reason: impl ToString) -> ExError {
    ExError::new(ExErrorKind::ExternalService)
        .with_op(operation.to_string())
        .with_message(reason.to_string())
}

/// Create a revision-not-found error
pub fn revision_not_found(revision: &str) -> ExError {
    ExError::from(ProtoCompatError::RevisionNotFound {
        revision: revision.to_string(),
    })
    .with_op("verify_revision")
}

/// Create a file-not-in-revision error
pub fn file_not_in_revision(revision: &str, path: &str) -> ExError {
    ExError::from(ProtoCompatError::FileNotInRevision {
        revision: revision.to_string(),
        path: path.to_string(),
    })
    .with_op("show_file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_keep_context() {
        let err = decode_error("decode_descriptor_set", "api.pb", "unexpected EOF");
        assert_eq!(err.kind(), ExErrorKind::Decode);
        assert_eq!(err.op(), Some("decode_descriptor_set"));
        assert_eq!(err.path(), Some("api.pb"));

        let err = file_not_in_revision("HEAD", "api.json");
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.revision(), Some("HEAD"));
    }
}
