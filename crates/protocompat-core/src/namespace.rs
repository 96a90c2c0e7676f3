//! Namespace flattener.
//!
//! Maps every message and enum declared in a file, at any nesting depth, to
//! its qualified dotted name. Qualified names are relative to the package:
//! a top-level message `User` is keyed `"User"` and an enum nested two levels
//! deep is keyed `"Outer.Inner.Status"`.
//!
//! Traversal uses an explicit work stack, so nesting depth is bounded by
//! memory rather than by the call stack.

use crate::descriptor::{Enum, Message, SchemaFile, Service};
use crate::errors::{ExError, ExErrorKind};
use std::collections::BTreeMap;

/// Visit every message reachable from `messages`, depth-first, passing its
/// qualified name.
fn walk_messages<'a>(
    messages: &'a [Message],
    prefix: &str,
    mut visit: impl FnMut(&str, &'a Message),
) {
    let mut stack: Vec<(String, &'a Message)> = messages
        .iter()
        .rev()
        .map(|m| (format!("{}{}", prefix, m.name), m))
        .collect();

    while let Some((qualified, message)) = stack.pop() {
        visit(&qualified, message);
        for nested in message.messages.iter().rev() {
            stack.push((format!("{}.{}", qualified, nested.name), nested));
        }
    }
}

/// Flatten messages at every depth into a qualified-name map.
pub fn flatten_messages<'a>(
    messages: &'a [Message],
    prefix: &str,
) -> BTreeMap<String, &'a Message> {
    let mut out = BTreeMap::new();
    walk_messages(messages, prefix, |qualified, message| {
        out.insert(qualified.to_string(), message);
    });
    out
}

/// Flatten top-level enums plus every enum nested inside `messages`.
///
/// Top-level enums are keyed `<prefix><name>`; an enum declared inside a
/// message is keyed `<message qualified name>.<name>`.
pub fn flatten_enums<'a>(
    enums: &'a [Enum],
    messages: &'a [Message],
    prefix: &str,
) -> BTreeMap<String, &'a Enum> {
    let mut out: BTreeMap<String, &'a Enum> = enums
        .iter()
        .map(|e| (format!("{}{}", prefix, e.name), e))
        .collect();
    walk_messages(messages, prefix, |qualified, message| {
        for e in &message.enums {
            out.insert(format!("{}.{}", qualified, e.name), e);
        }
    });
    out
}

/// An entity together with the path of the file that declares it.
#[derive(Debug)]
pub struct Scoped<'a, T> {
    pub file: &'a str,
    pub item: &'a T,
}

impl<T> Clone for Scoped<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Scoped<'_, T> {}

/// Flattened view over one or more files that share a package.
#[derive(Debug, Default)]
pub struct Namespace<'a> {
    pub messages: BTreeMap<String, Scoped<'a, Message>>,
    pub enums: BTreeMap<String, Scoped<'a, Enum>>,
    pub services: BTreeMap<String, Scoped<'a, Service>>,
}

impl<'a> Namespace<'a> {
    /// Build the namespace of a single file.
    pub fn of_file(file: &'a SchemaFile) -> Result<Self, ExError> {
        Self::of_files([file])
    }

    /// Build the union namespace of several files of the same package.
    ///
    /// # Errors
    ///
    /// `DuplicateIdentity` if two files declare the same qualified name.
    pub fn of_files(files: impl IntoIterator<Item = &'a SchemaFile>) -> Result<Self, ExError> {
        let mut ns = Namespace::default();
        for file in files {
            let path = file.path.as_str();
            for (name, message) in flatten_messages(&file.messages, "") {
                let entry = Scoped {
                    file: path,
                    item: message,
                };
                insert_unique(&mut ns.messages, name, entry, "message")?;
            }
            for (name, e) in flatten_enums(&file.enums, &file.messages, "") {
                let entry = Scoped {
                    file: path,
                    item: e,
                };
                insert_unique(&mut ns.enums, name, entry, "enum")?;
            }
            for service in &file.services {
                let entry = Scoped {
                    file: path,
                    item: service,
                };
                insert_unique(&mut ns.services, service.name.clone(), entry, "service")?;
            }
        }
        Ok(ns)
    }
}

fn insert_unique<'a, T>(
    map: &mut BTreeMap<String, Scoped<'a, T>>,
    name: String,
    entry: Scoped<'a, T>,
    what: &str,
) -> Result<(), ExError> {
    if let Some(existing) = map.get(&name) {
        return Err(ExError::new(ExErrorKind::DuplicateIdentity)
            .with_op("build_namespace")
            .with_path(entry.file)
            .with_subject(name.clone())
            .with_message(format!(
                "{} \"{}\" is also declared in \"{}\"",
                what, name, existing.file
            )));
    }
    map.insert(name, entry);
    Ok(())
}
