//! Descriptor tree model.
//!
//! The comparison engine consumes these types as already-resolved input; it
//! never parses schema text. Loaders for concrete formats live in
//! `protocompat-source`.

pub mod identity;
pub mod model;

pub use identity::{index_by_identity, match_by_identity, Identity, Matched};
pub use model::{
    Cardinality, Enum, EnumValue, Field, FieldKind, Message, Method, SchemaFile, Service, Snapshot,
};
