use protocompat_core::{Enum, Field, FieldKind, Finding, Message, Method, SchemaFile, Service};

/// Single-file schema in package `test`, as most comparator scenarios use.
#[allow(dead_code)]
pub fn file() -> SchemaFile {
    SchemaFile::new("test.proto", "test")
}

/// `message TestMessage { string name = 1; int32 age = 2; repeated string hobbies = 3; }`
#[allow(dead_code)]
pub fn test_message() -> Message {
    Message::new("TestMessage")
        .with_field(Field::new("name", 1, FieldKind::String))
        .with_field(Field::new("age", 2, FieldKind::Int32))
        .with_field(Field::new("hobbies", 3, FieldKind::String).repeated())
}

/// `enum Status { UNKNOWN = 0; ACTIVE = 1; }`
#[allow(dead_code)]
pub fn status_enum() -> Enum {
    Enum::new("Status")
        .with_value("UNKNOWN", 0)
        .with_value("ACTIVE", 1)
}

/// Request/response messages plus a one-method service.
#[allow(dead_code)]
pub fn service_file(method: Method) -> SchemaFile {
    file()
        .with_message(Message::new("Request"))
        .with_message(Message::new("Response"))
        .with_service(Service::new("TestService").with_method(method))
}

/// Rendered messages, for comparison against the console wording.
#[allow(dead_code)]
pub fn messages(findings: &[Finding]) -> Vec<String> {
    findings.iter().map(|f| f.to_string()).collect()
}
