//! Core types shared across bucketdiff facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! structured logging facility and by error reporting.

pub mod schema;
