//! Binary descriptor set decoding.
//!
//! Reads `google.protobuf.FileDescriptorSet` bytes as written by
//! `protoc --descriptor_set_out` or `buf build -o` and converts each file into
//! the engine's descriptor model.

use crate::errors::{decode_error, Result};
use prost::Message as _;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    FileDescriptorSet, MethodDescriptorProto, ServiceDescriptorProto,
};
use protocompat_core::{
    Cardinality, Enum, EnumValue, Field, FieldKind, Message, Method, SchemaFile, Service, Snapshot,
};

const OP: &str = "decode_descriptor_set";

/// Decode a descriptor set, falling back to a single `FileDescriptorProto`.
///
/// `origin` names the input in error messages.
///
/// # Errors
/// `Decode` if the bytes are neither a descriptor set nor a file descriptor,
/// or if a field carries neither a type nor a type name.
pub fn decode_descriptor_set(origin: &str, bytes: &[u8]) -> Result<Snapshot> {
    let files = match FileDescriptorSet::decode(bytes) {
        Ok(set) => set.file,
        Err(set_err) => match FileDescriptorProto::decode(bytes) {
            Ok(file) => vec![file],
            Err(_) => return Err(decode_error(OP, origin, set_err)),
        },
    };

    let files = files
        .iter()
        .map(|file| convert_file(origin, file))
        .collect::<Result<Vec<_>>>()?;
    Ok(Snapshot::new(files))
}

/// How `LABEL_OPTIONAL` is interpreted for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    /// proto3: optional only when `proto3_optional` is set
    Implicit,
    /// proto2 and editions: every optional field tracks presence
    Explicit,
}

fn convert_file(origin: &str, file: &FileDescriptorProto) -> Result<SchemaFile> {
    let presence = if file.syntax() == "proto3" {
        Presence::Implicit
    } else {
        Presence::Explicit
    };

    let mut out = SchemaFile::new(file.name(), file.package());
    out.messages = file
        .message_type
        .iter()
        .map(|m| convert_message(origin, m, presence))
        .collect::<Result<_>>()?;
    out.enums = file.enum_type.iter().map(convert_enum).collect();
    out.services = file.service.iter().map(convert_service).collect();
    Ok(out)
}

fn convert_message(origin: &str, message: &DescriptorProto, presence: Presence) -> Result<Message> {
    // Depth is already bounded by prost's decode recursion limit.
    let mut out = Message::new(message.name());
    out.fields = message
        .field
        .iter()
        .map(|f| convert_field(origin, message.name(), f, presence))
        .collect::<Result<_>>()?;
    out.messages = message
        .nested_type
        .iter()
        .map(|m| convert_message(origin, m, presence))
        .collect::<Result<_>>()?;
    out.enums = message.enum_type.iter().map(convert_enum).collect();
    Ok(out)
}

fn convert_field(
    origin: &str,
    message: &str,
    field: &FieldDescriptorProto,
    presence: Presence,
) -> Result<Field> {
    let kind = match field.r#type {
        Some(_) => field_kind(field.r#type()),
        // Unresolved descriptors leave the type unset and name the target.
        None if field.type_name.is_some() => FieldKind::Message,
        None => {
            return Err(decode_error(
                OP,
                origin,
                format!(
                    "field {:?} of message {:?} has neither type nor type_name",
                    field.name(),
                    message
                ),
            ))
        }
    };

    let cardinality = match field.label() {
        Label::Repeated => Cardinality::Repeated,
        Label::Optional if field.proto3_optional() || presence == Presence::Explicit => {
            Cardinality::Optional
        }
        Label::Optional | Label::Required => Cardinality::Singular,
    };

    let mut out = Field::new(field.name(), field.number(), kind);
    out.cardinality = cardinality;
    Ok(out)
}

fn field_kind(ty: Type) -> FieldKind {
    match ty {
        Type::Double => FieldKind::Double,
        Type::Float => FieldKind::Float,
        Type::Int64 => FieldKind::Int64,
        Type::Uint64 => FieldKind::Uint64,
        Type::Int32 => FieldKind::Int32,
        Type::Fixed64 => FieldKind::Fixed64,
        Type::Fixed32 => FieldKind::Fixed32,
        Type::Bool => FieldKind::Bool,
        Type::String => FieldKind::String,
        Type::Group => FieldKind::Group,
        Type::Message => FieldKind::Message,
        Type::Bytes => FieldKind::Bytes,
        Type::Uint32 => FieldKind::Uint32,
        Type::Enum => FieldKind::Enum,
        Type::Sfixed32 => FieldKind::Sfixed32,
        Type::Sfixed64 => FieldKind::Sfixed64,
        Type::Sint32 => FieldKind::Sint32,
        Type::Sint64 => FieldKind::Sint64,
    }
}

fn convert_enum(e: &EnumDescriptorProto) -> Enum {
    let mut out = Enum::new(e.name());
    out.values = e
        .value
        .iter()
        .map(|v| EnumValue {
            name: v.name().to_string(),
            number: v.number(),
        })
        .collect();
    out
}

fn convert_service(service: &ServiceDescriptorProto) -> Service {
    let mut out = Service::new(service.name());
    out.methods = service.method.iter().map(convert_method).collect();
    out
}

fn convert_method(method: &MethodDescriptorProto) -> Method {
    let mut out = Method::new(
        method.name(),
        strip_leading_dot(method.input_type()),
        strip_leading_dot(method.output_type()),
    );
    out.client_streaming = method.client_streaming();
    out.server_streaming = method.server_streaming();
    out
}

/// Fully-qualified descriptor names start with a dot (`.acme.v1.User`).
fn strip_leading_dot(name: &str) -> &str {
    name.strip_prefix('.').unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message as _;

    fn field(name: &str, number: i32, ty: Type, label: Label) -> FieldDescriptorProto {
        FieldDescriptorProto {
            name: Some(name.to_string()),
            number: Some(number),
            r#type: Some(ty as i32),
            label: Some(label as i32),
            ..Default::default()
        }
    }

    fn file(syntax: &str, fields: Vec<FieldDescriptorProto>) -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some("acme/user.proto".to_string()),
            package: Some("acme".to_string()),
            syntax: Some(syntax.to_string()),
            message_type: vec![DescriptorProto {
                name: Some("User".to_string()),
                field: fields,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_proto3_labels() {
        let mut opt = field("nickname", 3, Type::String, Label::Optional);
        opt.proto3_optional = Some(true);
        let fds = FileDescriptorSet {
            file: vec![file(
                "proto3",
                vec![
                    field("id", 1, Type::Int64, Label::Optional),
                    field("tags", 2, Type::String, Label::Repeated),
                    opt,
                ],
            )],
        };

        let snapshot = decode_descriptor_set("set.pb", &fds.encode_to_vec()).unwrap();
        let user = &snapshot.files[0].messages[0];
        let cards: Vec<Cardinality> = user.fields.iter().map(|f| f.cardinality).collect();
        assert_eq!(
            cards,
            vec![
                Cardinality::Singular,
                Cardinality::Repeated,
                Cardinality::Optional
            ]
        );
        assert_eq!(user.fields[0].kind, FieldKind::Int64);
    }

    #[test]
    fn test_proto2_optional_and_required() {
        let fds = FileDescriptorSet {
            file: vec![file(
                "",
                vec![
                    field("id", 1, Type::Int64, Label::Required),
                    field("name", 2, Type::String, Label::Optional),
                ],
            )],
        };

        let snapshot = decode_descriptor_set("set.pb", &fds.encode_to_vec()).unwrap();
        let user = &snapshot.files[0].messages[0];
        assert_eq!(user.fields[0].cardinality, Cardinality::Singular);
        assert_eq!(user.fields[1].cardinality, Cardinality::Optional);
    }

    #[test]
    fn test_method_types_lose_leading_dot() {
        let mut fd = file("proto3", vec![]);
        fd.service = vec![ServiceDescriptorProto {
            name: Some("Users".to_string()),
            method: vec![MethodDescriptorProto {
                name: Some("Watch".to_string()),
                input_type: Some(".acme.User".to_string()),
                output_type: Some(".acme.User".to_string()),
                server_streaming: Some(true),
                ..Default::default()
            }],
            ..Default::default()
        }];

        let snapshot =
            decode_descriptor_set("set.pb", &FileDescriptorSet { file: vec![fd] }.encode_to_vec())
                .unwrap();
        let method = &snapshot.files[0].services[0].methods[0];
        assert_eq!(method.input_type, "acme.User");
        assert!(method.server_streaming);
        assert!(!method.client_streaming);
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let err = decode_descriptor_set("junk.pb", &[0xff, 0xff, 0xff]).unwrap_err();
        assert_eq!(err.kind(), protocompat_core::ExErrorKind::Decode);
        assert_eq!(err.path(), Some("junk.pb"));
    }

    #[test]
    fn test_empty_input_is_an_empty_snapshot() {
        assert!(decode_descriptor_set("empty.pb", &[]).unwrap().is_empty());
    }
}
