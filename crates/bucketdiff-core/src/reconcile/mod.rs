//! Index reconciliation for grouped bucket diffs.
//!
//! A naive per-index diff cannot tell a changed value from a record that
//! moved to another index. [`GroupedDiffResult`] rebuilds the record
//! correspondence from the group's leader fields
//! ([`GroupedDiffResult::create_index_map`]) and then reports only genuine
//! value changes, plus synthetic trailing entries for deleted records.
//!
//! ## Guarantees
//!
//! - **Identity**: when no leader value changed, the index map is the identity.
//! - **No guessing**: ambiguous leader evidence fails the whole group with
//!   `AmbiguousIndexTransition`; there is no partial result.
//! - **Purity**: inputs are only read; every call builds a fresh map.

pub mod grouped;
pub mod index_map;

pub use grouped::GroupedDiffResult;
