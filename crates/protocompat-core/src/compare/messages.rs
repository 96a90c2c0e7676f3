//! Message comparator.

use crate::compare::fields::compare_fields;
use crate::descriptor::Message;
use crate::finding::{Change, Finding};
use crate::namespace::Scoped;
use std::collections::BTreeMap;

/// Compare two flattened message namespaces.
///
/// A removed message is reported once at its own qualified name. Its nested
/// children are absent from the current namespace as well and are reported
/// under their own names; no further suppression happens.
pub fn compare_messages(
    package: &str,
    prev: &BTreeMap<String, Scoped<'_, Message>>,
    curr: &BTreeMap<String, Scoped<'_, Message>>,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (name, p) in prev {
        match curr.get(name) {
            None => findings.push(Finding::new(
                p.file,
                package,
                Change::MessageRemoved {
                    message: name.clone(),
                },
            )),
            Some(c) => findings.extend(
                compare_fields(name, p.item, c.item)
                    .into_iter()
                    .map(|change| Finding::new(p.file, package, change)),
            ),
        }
    }

    findings
}
