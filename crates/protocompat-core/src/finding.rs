//! Breaking-change findings.
//!
//! A [`Finding`] pairs the structured [`Change`] with the file and package it
//! was detected in. `Display` renders the human-readable message; the kind
//! taxonomy stays available for filtering and triage.

use crate::descriptor::{Cardinality, FieldKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    PackageRemoved,
    MessageRemoved,
    FieldRemoved,
    FieldRenamed,
    FieldTypeChanged,
    FieldCardinalityNarrowed,
    EnumRemoved,
    EnumValueRemoved,
    EnumValueRenamed,
    ServiceRemoved,
    MethodRemoved,
    MethodInputChanged,
    MethodOutputChanged,
    MethodStreamingChanged,
}

/// Who a finding breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Code generated against the previous schema stops compiling; the wire
    /// format is unaffected
    Source,
    /// Existing peers can no longer decode data or dispatch calls
    Wire,
}

impl FindingKind {
    pub const ALL: [FindingKind; 14] = [
        FindingKind::PackageRemoved,
        FindingKind::MessageRemoved,
        FindingKind::FieldRemoved,
        FindingKind::FieldRenamed,
        FindingKind::FieldTypeChanged,
        FindingKind::FieldCardinalityNarrowed,
        FindingKind::EnumRemoved,
        FindingKind::EnumValueRemoved,
        FindingKind::EnumValueRenamed,
        FindingKind::ServiceRemoved,
        FindingKind::MethodRemoved,
        FindingKind::MethodInputChanged,
        FindingKind::MethodOutputChanged,
        FindingKind::MethodStreamingChanged,
    ];

    /// Stable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            FindingKind::PackageRemoved => "BRK_PACKAGE_REMOVED",
            FindingKind::MessageRemoved => "BRK_MESSAGE_REMOVED",
            FindingKind::FieldRemoved => "BRK_FIELD_REMOVED",
            FindingKind::FieldRenamed => "BRK_FIELD_RENAMED",
            FindingKind::FieldTypeChanged => "BRK_FIELD_TYPE_CHANGED",
            FindingKind::FieldCardinalityNarrowed => "BRK_FIELD_CARDINALITY_NARROWED",
            FindingKind::EnumRemoved => "BRK_ENUM_REMOVED",
            FindingKind::EnumValueRemoved => "BRK_ENUM_VALUE_REMOVED",
            FindingKind::EnumValueRenamed => "BRK_ENUM_VALUE_RENAMED",
            FindingKind::ServiceRemoved => "BRK_SERVICE_REMOVED",
            FindingKind::MethodRemoved => "BRK_METHOD_REMOVED",
            FindingKind::MethodInputChanged => "BRK_METHOD_INPUT_CHANGED",
            FindingKind::MethodOutputChanged => "BRK_METHOD_OUTPUT_CHANGED",
            FindingKind::MethodStreamingChanged => "BRK_METHOD_STREAMING_CHANGED",
        }
    }

    /// Kebab-case name, as used in config files and `--ignore`
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::PackageRemoved => "package-removed",
            FindingKind::MessageRemoved => "message-removed",
            FindingKind::FieldRemoved => "field-removed",
            FindingKind::FieldRenamed => "field-renamed",
            FindingKind::FieldTypeChanged => "field-type-changed",
            FindingKind::FieldCardinalityNarrowed => "field-cardinality-narrowed",
            FindingKind::EnumRemoved => "enum-removed",
            FindingKind::EnumValueRemoved => "enum-value-removed",
            FindingKind::EnumValueRenamed => "enum-value-renamed",
            FindingKind::ServiceRemoved => "service-removed",
            FindingKind::MethodRemoved => "method-removed",
            FindingKind::MethodInputChanged => "method-input-changed",
            FindingKind::MethodOutputChanged => "method-output-changed",
            FindingKind::MethodStreamingChanged => "method-streaming-changed",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::FieldRenamed | FindingKind::EnumValueRenamed => Severity::Source,
            _ => Severity::Wire,
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FindingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FindingKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown finding kind: {}", s))
    }
}

/// Which streaming flag of a method changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamSide {
    Client,
    Server,
}

impl fmt::Display for StreamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamSide::Client => f.write_str("client"),
            StreamSide::Server => f.write_str("server"),
        }
    }
}

/// Structured payload of a finding. Message, enum and service names are
/// qualified relative to the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Change {
    PackageRemoved {
        package_name: String,
    },
    MessageRemoved {
        message: String,
    },
    FieldRemoved {
        message: String,
        field: String,
        number: i32,
    },
    FieldRenamed {
        message: String,
        number: i32,
        old_name: String,
        new_name: String,
    },
    FieldTypeChanged {
        message: String,
        field: String,
        old_kind: FieldKind,
        new_kind: FieldKind,
    },
    FieldCardinalityNarrowed {
        message: String,
        field: String,
        old_cardinality: Cardinality,
        new_cardinality: Cardinality,
    },
    EnumRemoved {
        enum_name: String,
    },
    EnumValueRemoved {
        enum_name: String,
        value: String,
        number: i32,
    },
    EnumValueRenamed {
        enum_name: String,
        number: i32,
        old_name: String,
        new_name: String,
    },
    ServiceRemoved {
        service: String,
    },
    MethodRemoved {
        service: String,
        method: String,
    },
    MethodInputChanged {
        service: String,
        method: String,
        old_type: String,
        new_type: String,
    },
    MethodOutputChanged {
        service: String,
        method: String,
        old_type: String,
        new_type: String,
    },
    MethodStreamingChanged {
        service: String,
        method: String,
        side: StreamSide,
        old_streaming: bool,
        new_streaming: bool,
    },
}

impl Change {
    pub fn kind(&self) -> FindingKind {
        match self {
            Change::PackageRemoved { .. } => FindingKind::PackageRemoved,
            Change::MessageRemoved { .. } => FindingKind::MessageRemoved,
            Change::FieldRemoved { .. } => FindingKind::FieldRemoved,
            Change::FieldRenamed { .. } => FindingKind::FieldRenamed,
            Change::FieldTypeChanged { .. } => FindingKind::FieldTypeChanged,
            Change::FieldCardinalityNarrowed { .. } => FindingKind::FieldCardinalityNarrowed,
            Change::EnumRemoved { .. } => FindingKind::EnumRemoved,
            Change::EnumValueRemoved { .. } => FindingKind::EnumValueRemoved,
            Change::EnumValueRenamed { .. } => FindingKind::EnumValueRenamed,
            Change::ServiceRemoved { .. } => FindingKind::ServiceRemoved,
            Change::MethodRemoved { .. } => FindingKind::MethodRemoved,
            Change::MethodInputChanged { .. } => FindingKind::MethodInputChanged,
            Change::MethodOutputChanged { .. } => FindingKind::MethodOutputChanged,
            Change::MethodStreamingChanged { .. } => FindingKind::MethodStreamingChanged,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::PackageRemoved { package_name } => {
                write!(f, "Package {:?} was removed", package_name)
            }
            Change::MessageRemoved { message } => write!(f, "Message {:?} was removed", message),
            Change::FieldRemoved {
                message,
                field,
                number,
            } => write!(
                f,
                "Field {:?} (number {}) was removed from message {:?}",
                field, number, message
            ),
            Change::FieldRenamed {
                message,
                old_name,
                new_name,
                ..
            } => write!(
                f,
                "Field renamed from {:?} to {:?} in message {:?}",
                old_name, new_name, message
            ),
            Change::FieldTypeChanged {
                message,
                field,
                old_kind,
                new_kind,
            } => write!(
                f,
                "Field {:?} type changed from {} to {} in message {:?}",
                field, old_kind, new_kind, message
            ),
            Change::FieldCardinalityNarrowed {
                message,
                field,
                new_cardinality,
                ..
            } => write!(
                f,
                "Field {:?} cardinality changed from repeated to {} in message {:?}",
                field, new_cardinality, message
            ),
            Change::EnumRemoved { enum_name } => write!(f, "Enum {:?} was removed", enum_name),
            Change::EnumValueRemoved {
                enum_name,
                value,
                number,
            } => write!(
                f,
                "Enum value {:?} (number {}) was removed from enum {:?}",
                value, number, enum_name
            ),
            Change::EnumValueRenamed {
                enum_name,
                old_name,
                new_name,
                ..
            } => write!(
                f,
                "Enum value renamed from {:?} to {:?} in enum {:?}",
                old_name, new_name, enum_name
            ),
            Change::ServiceRemoved { service } => write!(f, "Service {:?} was removed", service),
            Change::MethodRemoved { service, method } => write!(
                f,
                "Method {:?} was removed from service {:?}",
                method, service
            ),
            Change::MethodInputChanged {
                service,
                method,
                old_type,
                new_type,
            } => write!(
                f,
                "Method {:?} input type changed from {} to {} in service {:?}",
                method, old_type, new_type, service
            ),
            Change::MethodOutputChanged {
                service,
                method,
                old_type,
                new_type,
            } => write!(
                f,
                "Method {:?} output type changed from {} to {} in service {:?}",
                method, old_type, new_type, service
            ),
            Change::MethodStreamingChanged {
                service,
                method,
                side,
                old_streaming,
                new_streaming,
            } => write!(
                f,
                "Method {:?} {} streaming changed from {} to {} in service {:?}",
                method, side, old_streaming, new_streaming, service
            ),
        }
    }
}

/// One breaking-change finding, attributed to the previous file that declared
/// the affected entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub file: String,
    pub package: String,
    #[serde(flatten)]
    pub change: Change,
}

impl Finding {
    pub fn new(file: impl Into<String>, package: impl Into<String>, change: Change) -> Self {
        Self {
            file: file.into(),
            package: package.into(),
            change,
        }
    }

    pub fn kind(&self) -> FindingKind {
        self.change.kind()
    }

    pub fn severity(&self) -> Severity {
        self.kind().severity()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.change {
            Change::PackageRemoved { .. } => write!(f, "{} (file {:?})", self.change, self.file),
            _ => write!(f, "{}", self.change),
        }
    }
}
