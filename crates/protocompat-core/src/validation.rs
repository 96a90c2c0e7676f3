//! Structural validation of descriptor trees.
//!
//! Only identity fields are checked: names, numbers and the uniqueness of
//! identity keys among siblings. Type resolution and reserved ranges belong
//! to the parser that produced the tree.

use crate::descriptor::{Enum, Message, SchemaFile};
use crate::errors::{ProtoCompatError, Result};
use std::collections::{BTreeMap, BTreeSet};

const FILE_SCOPE: &str = "file scope";

/// Validate one schema file
///
/// # Errors
/// Returns the first violation found, walking the file in declaration order:
/// `EmptyPath`, `MissingName`, `InvalidFieldNumber`, `DuplicateIdentity` or
/// `EnumAlias`.
pub fn validate_file(file: &SchemaFile) -> Result<()> {
    if file.path.is_empty() {
        return Err(ProtoCompatError::EmptyPath);
    }
    let path = file.path.as_str();

    check_names(path, "message", FILE_SCOPE, file.messages.iter().map(|m| m.name.as_str()))?;
    check_names(path, "enum", FILE_SCOPE, file.enums.iter().map(|e| e.name.as_str()))?;
    check_names(path, "service", FILE_SCOPE, file.services.iter().map(|s| s.name.as_str()))?;

    for e in &file.enums {
        validate_enum(path, &e.name, e)?;
    }

    for service in &file.services {
        let scope = format!("service {}", service.name);
        check_names(path, "method", &scope, service.methods.iter().map(|m| m.name.as_str()))?;
    }

    let mut stack: Vec<(String, &Message)> = file
        .messages
        .iter()
        .rev()
        .map(|m| (m.name.clone(), m))
        .collect();
    while let Some((qualified, message)) = stack.pop() {
        validate_message(path, &qualified, message)?;
        for nested in message.messages.iter().rev() {
            stack.push((format!("{}.{}", qualified, nested.name), nested));
        }
    }

    Ok(())
}

/// Check one message's own fields and direct children; nested messages are
/// visited by the caller.
fn validate_message(path: &str, qualified: &str, message: &Message) -> Result<()> {
    let scope = format!("message {}", qualified);

    check_names(path, "field", &scope, message.fields.iter().map(|f| f.name.as_str()))?;
    let mut numbers = BTreeSet::new();
    for field in &message.fields {
        if field.number < 1 {
            return Err(ProtoCompatError::InvalidFieldNumber {
                path: path.to_string(),
                message: qualified.to_string(),
                field: field.name.clone(),
                number: field.number,
            });
        }
        if !numbers.insert(field.number) {
            return Err(duplicate(path, "field number", &scope, field.number));
        }
    }

    check_names(path, "message", &scope, message.messages.iter().map(|m| m.name.as_str()))?;
    check_names(path, "enum", &scope, message.enums.iter().map(|e| e.name.as_str()))?;
    for e in &message.enums {
        validate_enum(path, &format!("{}.{}", qualified, e.name), e)?;
    }

    Ok(())
}

fn validate_enum(path: &str, qualified: &str, e: &Enum) -> Result<()> {
    let scope = format!("enum {}", qualified);
    if e.values.iter().any(|v| v.name.is_empty()) {
        return Err(missing_name(path, "enum value", &scope));
    }
    // Aliases share a number, and the number is the identity key.
    let mut numbers: BTreeMap<i32, &str> = BTreeMap::new();
    for value in &e.values {
        if let Some(first) = numbers.insert(value.number, &value.name) {
            return Err(ProtoCompatError::EnumAlias {
                path: path.to_string(),
                scope,
                number: value.number,
                first: first.to_string(),
                alias: value.name.clone(),
            });
        }
    }
    Ok(())
}

/// Every name non-empty and unique among its siblings.
fn check_names<'a>(
    path: &str,
    entity: &str,
    scope: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = BTreeSet::new();
    for name in names {
        if name.is_empty() {
            return Err(missing_name(path, entity, scope));
        }
        if !seen.insert(name) {
            return Err(duplicate(path, entity, scope, name));
        }
    }
    Ok(())
}

fn missing_name(path: &str, entity: &str, scope: &str) -> ProtoCompatError {
    ProtoCompatError::MissingName {
        path: path.to_string(),
        entity: entity.to_string(),
        scope: scope.to_string(),
    }
}

fn duplicate(path: &str, entity: &str, scope: &str, key: impl ToString) -> ProtoCompatError {
    ProtoCompatError::DuplicateIdentity {
        path: path.to_string(),
        entity: entity.to_string(),
        scope: scope.to_string(),
        key: key.to_string(),
    }
}
