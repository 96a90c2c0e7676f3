//! Enum comparator.

use crate::descriptor::{match_by_identity, Enum, Matched};
use crate::finding::{Change, Finding};
use crate::namespace::Scoped;
use std::collections::BTreeMap;

/// Compare the values of one matched enum pair by value number.
pub fn compare_enum_values(qualified_name: &str, prev: &Enum, curr: &Enum) -> Vec<Change> {
    match_by_identity(&prev.values, &curr.values)
        .into_iter()
        .filter_map(|matched| match matched {
            Matched::Removed(p) => Some(Change::EnumValueRemoved {
                enum_name: qualified_name.to_string(),
                value: p.name.clone(),
                number: p.number,
            }),
            Matched::Kept(p, c) if p.name != c.name => Some(Change::EnumValueRenamed {
                enum_name: qualified_name.to_string(),
                number: p.number,
                old_name: p.name.clone(),
                new_name: c.name.clone(),
            }),
            Matched::Kept(..) => None,
        })
        .collect()
}

/// Compare two flattened enum namespaces (top-level and nested enums alike).
///
/// An enum nested in a removed message is reported here independently of the
/// message removal.
pub fn compare_enums(
    package: &str,
    prev: &BTreeMap<String, Scoped<'_, Enum>>,
    curr: &BTreeMap<String, Scoped<'_, Enum>>,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (name, p) in prev {
        match curr.get(name) {
            None => findings.push(Finding::new(
                p.file,
                package,
                Change::EnumRemoved {
                    enum_name: name.clone(),
                },
            )),
            Some(c) => findings.extend(
                compare_enum_values(name, p.item, c.item)
                    .into_iter()
                    .map(|change| Finding::new(p.file, package, change)),
            ),
        }
    }

    findings
}
