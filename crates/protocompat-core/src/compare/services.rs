//! Service comparator.
//!
//! Services and methods have no numeric tag; the name is the contract with
//! existing client stubs.

use crate::descriptor::{match_by_identity, Matched, Service};
use crate::finding::{Change, Finding, StreamSide};
use crate::namespace::Scoped;
use std::collections::BTreeMap;

/// Compare the methods of one matched service pair.
///
/// The four method checks are independent; every differing axis yields its
/// own change.
pub fn compare_methods(prev: &Service, curr: &Service) -> Vec<Change> {
    let service = &prev.name;
    let mut changes = Vec::new();

    for matched in match_by_identity(&prev.methods, &curr.methods) {
        let (p, c) = match matched {
            Matched::Removed(p) => {
                changes.push(Change::MethodRemoved {
                    service: service.clone(),
                    method: p.name.clone(),
                });
                continue;
            }
            Matched::Kept(p, c) => (p, c),
        };

        if p.input_type != c.input_type {
            changes.push(Change::MethodInputChanged {
                service: service.clone(),
                method: p.name.clone(),
                old_type: p.input_type.clone(),
                new_type: c.input_type.clone(),
            });
        }
        if p.output_type != c.output_type {
            changes.push(Change::MethodOutputChanged {
                service: service.clone(),
                method: p.name.clone(),
                old_type: p.output_type.clone(),
                new_type: c.output_type.clone(),
            });
        }
        let streaming = [
            (StreamSide::Client, p.client_streaming, c.client_streaming),
            (StreamSide::Server, p.server_streaming, c.server_streaming),
        ];
        for (side, old_streaming, new_streaming) in streaming {
            if old_streaming != new_streaming {
                changes.push(Change::MethodStreamingChanged {
                    service: service.clone(),
                    method: p.name.clone(),
                    side,
                    old_streaming,
                    new_streaming,
                });
            }
        }
    }

    changes
}

/// Compare two service indexes keyed by service name.
pub fn compare_services(
    package: &str,
    prev: &BTreeMap<String, Scoped<'_, Service>>,
    curr: &BTreeMap<String, Scoped<'_, Service>>,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (name, p) in prev {
        match curr.get(name) {
            None => findings.push(Finding::new(
                p.file,
                package,
                Change::ServiceRemoved {
                    service: name.clone(),
                },
            )),
            Some(c) => findings.extend(
                compare_methods(p.item, c.item)
                    .into_iter()
                    .map(|change| Finding::new(p.file, package, change)),
            ),
        }
    }

    findings
}
