use thiserror::Error;

/// Result type alias using ProtoCompatError
pub type Result<T> = std::result::Result<T, ProtoCompatError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error surfaced by protocompat maps to one of these kinds, and each
/// kind maps to a stable code usable by scripts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Descriptor input
    /// A descriptor tree is missing an identity field (name, number)
    InvalidDescriptor,
    /// Two sibling entities share an identity key
    DuplicateIdentity,
    /// Descriptor bytes could not be decoded
    Decode,
    /// The descriptor document declares a schema version this build cannot read
    UnsupportedSchemaVersion,
    /// The snapshot file extension does not map to a known loader
    UnsupportedFormat,

    // Version retrieval
    /// The requested revision does not exist in the repository
    RevisionNotFound,
    NotFound,
    ExternalService,

    // Integration/IO
    Io,
    Serialization,
    Config,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidDescriptor => "ERR_INVALID_DESCRIPTOR",
            ExErrorKind::DuplicateIdentity => "ERR_DUPLICATE_IDENTITY",
            ExErrorKind::Decode => "ERR_DECODE",
            ExErrorKind::UnsupportedSchemaVersion => "ERR_UNSUPPORTED_SCHEMA_VERSION",
            ExErrorKind::UnsupportedFormat => "ERR_UNSUPPORTED_FORMAT",
            ExErrorKind::RevisionNotFound => "ERR_REVISION_NOT_FOUND",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context
/// (operation, file path, qualified subject, revision) needed to act on it.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    subject: Option<String>,
    revision: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            subject: None,
            revision: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add schema file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add qualified subject context (message, enum, service, ...)
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Add revision context
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the file path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the subject context, if any
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Get the revision context, if any
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(subject) = &self.subject {
            write!(f, " (subject: {})", subject)?;
        }
        if let Some(revision) = &self.revision {
            write!(f, " (revision: {})", revision)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for descriptor validation and loading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtoCompatError {
    // ===== Descriptor Errors =====
    /// Schema file has no path
    #[error("Schema file has an empty path")]
    EmptyPath,

    /// A declaration is missing its name
    #[error("{entity} without a name in {scope} of file {path}")]
    MissingName {
        path: String,
        entity: String,
        scope: String,
    },

    /// Field number outside the valid wire range
    #[error("Field {field} in message {message} of file {path} has invalid number {number}")]
    InvalidFieldNumber {
        path: String,
        message: String,
        field: String,
        number: i32,
    },

    /// Two siblings share an identity key
    #[error("Duplicate {entity} {key} in {scope} of file {path}")]
    DuplicateIdentity {
        path: String,
        entity: String,
        scope: String,
        key: String,
    },

    /// Two enum values share a number (`allow_alias`)
    #[error(
        "Enum values {first} and {alias} share number {number} in {scope} of file {path}: \
         aliased enum values are not supported"
    )]
    EnumAlias {
        path: String,
        scope: String,
        number: i32,
        first: String,
        alias: String,
    },

    // ===== Loading Errors =====
    /// Descriptor document declares an unknown schema version
    #[error("Unsupported descriptor document schema_version: {version}. Expected 0")]
    UnsupportedSchemaVersion { version: u32 },

    /// No loader for the snapshot's file extension
    #[error("Unsupported snapshot format: {path}")]
    UnsupportedFormat { path: String },

    /// Descriptor bytes could not be decoded
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },

    // ===== Retrieval Errors =====
    /// Revision does not resolve to a commit
    #[error("Revision '{revision}' does not exist or is invalid")]
    RevisionNotFound { revision: String },

    /// File did not exist at the requested revision
    #[error("File {path} does not exist at revision '{revision}'")]
    FileNotInRevision { revision: String, path: String },
}

/// Conversion from ProtoCompatError to ExError
impl From<ProtoCompatError> for ExError {
    fn from(err: ProtoCompatError) -> Self {
        let message = err.to_string();
        match err {
            ProtoCompatError::EmptyPath => {
                ExError::new(ExErrorKind::InvalidDescriptor).with_message(message)
            }
            ProtoCompatError::MissingName { path, scope, .. } => {
                ExError::new(ExErrorKind::InvalidDescriptor)
                    .with_path(path)
                    .with_subject(scope)
                    .with_message(message)
            }
            ProtoCompatError::InvalidFieldNumber {
                path, message: msg, ..
            } => ExError::new(ExErrorKind::InvalidDescriptor)
                .with_path(path)
                .with_subject(msg)
                .with_message(message),
            ProtoCompatError::DuplicateIdentity { path, scope, .. } => {
                ExError::new(ExErrorKind::DuplicateIdentity)
                    .with_path(path)
                    .with_subject(scope)
                    .with_message(message)
            }
            ProtoCompatError::EnumAlias { path, scope, .. } => {
                ExError::new(ExErrorKind::DuplicateIdentity)
                    .with_path(path)
                    .with_subject(scope)
                    .with_message(message)
            }
            ProtoCompatError::UnsupportedSchemaVersion { .. } => {
                ExError::new(ExErrorKind::UnsupportedSchemaVersion).with_message(message)
            }
            ProtoCompatError::UnsupportedFormat { path } => {
                ExError::new(ExErrorKind::UnsupportedFormat)
                    .with_path(path)
                    .with_message(message)
            }
            ProtoCompatError::Decode { path, .. } => ExError::new(ExErrorKind::Decode)
                .with_path(path)
                .with_message(message),
            ProtoCompatError::RevisionNotFound { revision } => {
                ExError::new(ExErrorKind::RevisionNotFound)
                    .with_revision(revision)
                    .with_message(message)
            }
            ProtoCompatError::FileNotInRevision { revision, path } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_revision(revision)
                    .with_path(path)
                    .with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_context() {
        let err = ExError::new(ExErrorKind::InvalidDescriptor)
            .with_op("validate_file")
            .with_path("a.proto")
            .with_message("field without a name");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_INVALID_DESCRIPTOR]"));
        assert!(text.contains("validate_file"));
        assert!(text.contains("a.proto"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk gone");
        let outer = ExError::new(ExErrorKind::Decode).with_source(inner);
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::Io)
        );
        assert!(std::error::Error::source(&outer).is_some());
    }
}
