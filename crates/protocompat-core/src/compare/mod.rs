//! Entity comparators.
//!
//! Each comparator follows the same pattern: match previous entities to
//! current ones by identity key, report unmatched previous entities as
//! removed, then diff every matched pair. Entities only present in the
//! current version never produce findings.

pub mod enums;
pub mod fields;
pub mod messages;
pub mod services;

pub use enums::{compare_enum_values, compare_enums};
pub use fields::compare_fields;
pub use messages::compare_messages;
pub use services::{compare_methods, compare_services};
