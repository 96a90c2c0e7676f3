//! Resolved descriptor tree types.
//!
//! A descriptor tree is produced once per snapshot by an external parser and
//! is treated as read-only for the rest of a comparison run. All collections
//! preserve declaration order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a comparison run: every schema file known to a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub files: Vec<SchemaFile>,
}

impl Snapshot {
    pub fn new(files: Vec<SchemaFile>) -> Self {
        Self { files }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// One parsed schema file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Path of the file, relative to the schema root
    pub path: String,
    /// Dotted package identifier; empty for the default package
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub enums: Vec<Enum>,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl SchemaFile {
    pub fn new(path: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            package: package.into(),
            messages: Vec::new(),
            enums: Vec::new(),
            services: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_enum(mut self, e: Enum) -> Self {
        self.enums.push(e);
        self
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }
}

/// A message declaration, possibly containing nested messages and enums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub enums: Vec<Enum>,
}

impl Message {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            messages: Vec::new(),
            enums: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_enum(mut self, e: Enum) -> Self {
        self.enums.push(e);
        self
    }
}

/// A message field. Its wire identity is `number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub number: i32,
    pub kind: FieldKind,
    #[serde(default)]
    pub cardinality: Cardinality,
}

impl Field {
    pub fn new(name: impl Into<String>, number: i32, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            number,
            kind,
            cardinality: Cardinality::Singular,
        }
    }

    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }

    pub fn optional(mut self) -> Self {
        self.cardinality = Cardinality::Optional;
        self
    }
}

/// Wire-level field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

impl FieldKind {
    /// Every kind, in protobuf type-number order.
    pub const ALL: [FieldKind; 18] = [
        FieldKind::Double,
        FieldKind::Float,
        FieldKind::Int64,
        FieldKind::Uint64,
        FieldKind::Int32,
        FieldKind::Fixed64,
        FieldKind::Fixed32,
        FieldKind::Bool,
        FieldKind::String,
        FieldKind::Group,
        FieldKind::Message,
        FieldKind::Bytes,
        FieldKind::Uint32,
        FieldKind::Enum,
        FieldKind::Sfixed32,
        FieldKind::Sfixed64,
        FieldKind::Sint32,
        FieldKind::Sint64,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Double => "double",
            FieldKind::Float => "float",
            FieldKind::Int64 => "int64",
            FieldKind::Uint64 => "uint64",
            FieldKind::Int32 => "int32",
            FieldKind::Fixed64 => "fixed64",
            FieldKind::Fixed32 => "fixed32",
            FieldKind::Bool => "bool",
            FieldKind::String => "string",
            FieldKind::Group => "group",
            FieldKind::Message => "message",
            FieldKind::Bytes => "bytes",
            FieldKind::Uint32 => "uint32",
            FieldKind::Enum => "enum",
            FieldKind::Sfixed32 => "sfixed32",
            FieldKind::Sfixed64 => "sfixed64",
            FieldKind::Sint32 => "sint32",
            FieldKind::Sint64 => "sint64",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many values a field holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    #[default]
    Singular,
    Optional,
    Repeated,
}

impl Cardinality {
    pub fn is_repeated(&self) -> bool {
        matches!(self, Cardinality::Repeated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::Singular => "singular",
            Cardinality::Optional => "optional",
            Cardinality::Repeated => "repeated",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An enum declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, number: i32) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            number,
        });
        self
    }
}

/// An enum value. Its wire identity is `number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}

/// A service declaration. Services never nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }
}

/// An RPC method. Identity is `name`; type names are fully qualified without
/// a leading dot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
    #[serde(default)]
    pub client_streaming: bool,
    #[serde(default)]
    pub server_streaming: bool,
}

impl Method {
    pub fn new(
        name: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input_type: input_type.into(),
            output_type: output_type.into(),
            client_streaming: false,
            server_streaming: false,
        }
    }

    pub fn client_streaming(mut self) -> Self {
        self.client_streaming = true;
        self
    }

    pub fn server_streaming(mut self) -> Self {
        self.server_streaming = true;
        self
    }
}
