//! Field comparator.

use crate::descriptor::{match_by_identity, Matched, Message};
use crate::finding::Change;

/// Compare the fields of one matched message pair.
///
/// Nested messages are not visited; every message is compared once through
/// its own qualified name. Each matched field is checked on three independent
/// axes, in order: name, kind, cardinality narrowing.
pub fn compare_fields(qualified_name: &str, prev: &Message, curr: &Message) -> Vec<Change> {
    let mut changes = Vec::new();

    for matched in match_by_identity(&prev.fields, &curr.fields) {
        match matched {
            Matched::Removed(p) => changes.push(Change::FieldRemoved {
                message: qualified_name.to_string(),
                field: p.name.clone(),
                number: p.number,
            }),
            Matched::Kept(p, c) => {
                if p.name != c.name {
                    changes.push(Change::FieldRenamed {
                        message: qualified_name.to_string(),
                        number: p.number,
                        old_name: p.name.clone(),
                        new_name: c.name.clone(),
                    });
                }
                if p.kind != c.kind {
                    changes.push(Change::FieldTypeChanged {
                        message: qualified_name.to_string(),
                        field: p.name.clone(),
                        old_kind: p.kind,
                        new_kind: c.kind,
                    });
                }
                // Widening to repeated is wire-safe; only narrowing breaks.
                if p.cardinality.is_repeated() && !c.cardinality.is_repeated() {
                    changes.push(Change::FieldCardinalityNarrowed {
                        message: qualified_name.to_string(),
                        field: p.name.clone(),
                        old_cardinality: p.cardinality,
                        new_cardinality: c.cardinality,
                    });
                }
            }
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Field, FieldKind};
    use crate::finding::FindingKind;

    fn kinds(changes: &[Change]) -> Vec<FindingKind> {
        changes.iter().map(|c| c.kind()).collect()
    }

    #[test]
    fn test_rename_type_and_cardinality_fire_together() {
        let prev = Message::new("M").with_field(Field::new("tags", 1, FieldKind::String).repeated());
        let curr = Message::new("M").with_field(Field::new("labels", 1, FieldKind::Bytes));
        let changes = compare_fields("M", &prev, &curr);
        assert_eq!(
            kinds(&changes),
            vec![
                FindingKind::FieldRenamed,
                FindingKind::FieldTypeChanged,
                FindingKind::FieldCardinalityNarrowed,
            ]
        );
    }

    #[test]
    fn test_removal_is_by_number_not_name() {
        let prev = Message::new("M").with_field(Field::new("id", 1, FieldKind::Int64));
        let curr = Message::new("M").with_field(Field::new("id", 2, FieldKind::Int64));
        let changes = compare_fields("M", &prev, &curr);
        assert_eq!(
            changes,
            vec![Change::FieldRemoved {
                message: "M".to_string(),
                field: "id".to_string(),
                number: 1,
            }]
        );
    }

    #[test]
    fn test_widening_to_repeated_is_silent() {
        let prev = Message::new("M").with_field(Field::new("name", 1, FieldKind::String));
        let curr = Message::new("M").with_field(Field::new("name", 1, FieldKind::String).repeated());
        assert!(compare_fields("M", &prev, &curr).is_empty());
    }

    #[test]
    fn test_repeated_to_optional_is_narrowing() {
        let prev = Message::new("M").with_field(Field::new("name", 1, FieldKind::String).repeated());
        let curr = Message::new("M").with_field(Field::new("name", 1, FieldKind::String).optional());
        let changes = compare_fields("M", &prev, &curr);
        assert_eq!(kinds(&changes), vec![FindingKind::FieldCardinalityNarrowed]);
    }

    #[test]
    fn test_added_fields_are_silent() {
        let prev = Message::new("M").with_field(Field::new("name", 1, FieldKind::String));
        let curr = Message::new("M")
            .with_field(Field::new("name", 1, FieldKind::String))
            .with_field(Field::new("age", 2, FieldKind::Int32));
        assert!(compare_fields("M", &prev, &curr).is_empty());
    }
}
