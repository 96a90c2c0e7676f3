//! Core types shared across protocompat facilities
//!
//! This crate holds the canonical vocabulary used by both the error and
//! logging facilities, so that every crate in the workspace emits the same
//! structured field keys and event names.

pub mod schema;
