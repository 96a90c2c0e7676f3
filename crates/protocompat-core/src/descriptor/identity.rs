//! Identity keys used to match entities across versions.
//!
//! Fields and enum values are matched by their numeric wire tag. Services and
//! methods carry no tag, so their name is the contract. Messages and enums are
//! matched by qualified name through [`crate::namespace`].

use crate::descriptor::model::{EnumValue, Field, Method, Service};
use std::collections::BTreeMap;
use std::fmt::Display;

/// An entity that can be matched against its counterpart in another version.
pub trait Identity {
    type Key: Ord + Clone + Display;

    fn identity(&self) -> Self::Key;
}

impl Identity for Field {
    type Key = i32;

    fn identity(&self) -> i32 {
        self.number
    }
}

impl Identity for EnumValue {
    type Key = i32;

    fn identity(&self) -> i32 {
        self.number
    }
}

impl Identity for Method {
    type Key = String;

    fn identity(&self) -> String {
        self.name.clone()
    }
}

impl Identity for Service {
    type Key = String;

    fn identity(&self) -> String {
        self.name.clone()
    }
}

/// Outcome of looking up one previous entity in the current version.
#[derive(Debug, PartialEq)]
pub enum Matched<'a, T> {
    /// No current entity carries the previous entity's key
    Removed(&'a T),
    /// Both versions carry the key
    Kept(&'a T, &'a T),
}

/// Index a slice by identity key. Later duplicates win; validation rejects
/// duplicate keys before comparison.
pub fn index_by_identity<T: Identity>(items: &[T]) -> BTreeMap<T::Key, &T> {
    items.iter().map(|item| (item.identity(), item)).collect()
}

/// Match every previous entity against the current set, in previous
/// declaration order. Entities only present in `curr` are never yielded.
pub fn match_by_identity<'a, T: Identity>(prev: &'a [T], curr: &'a [T]) -> Vec<Matched<'a, T>> {
    let curr_by_key = index_by_identity(curr);
    prev.iter()
        .map(|p| match curr_by_key.get(&p.identity()) {
            Some(c) => Matched::Kept(p, *c),
            None => Matched::Removed(p),
        })
        .collect()
}
