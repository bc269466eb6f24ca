//! bucketdiff core - grouped bucket diff and index reconciliation
//!
//! A bucket is a set of named fields, each holding an ordered sequence of
//! values; index `i` across the fields of one group is one logical record.
//! This crate compares two snapshots of a bucket and tells apart:
//! - values that genuinely changed at an index,
//! - records that only moved to another index,
//! - records that were inserted or deleted.
//!
//! Storage, group declarations and scalar comparison are collaborators
//! behind the [`BucketAccessor`], [`GroupDescriptor`] and
//! [`ScalarSequenceDiffer`] traits, with in-memory implementations included.

pub mod bucket;
pub mod config;
pub mod context;
pub mod diff;
pub mod differ;
pub mod errors;
pub mod group;
pub mod logging_facility;
pub mod reconcile;

pub use bucketdiff_core_types::schema;

// Re-export commonly used types
pub use bucket::{Bucket, BucketAccessor};
pub use config::DiffConfig;
pub use context::{DiffContext, DiffSource, GroupedDiffContext};
pub use diff::{
    diff_bucket, diff_group, BucketDiffReport, DescribeChanges, IndexMap, ReconciledGroupDiff,
    ValueChange,
};
pub use differ::{ScalarSequenceDiffer, StrictSequenceDiffer};
pub use errors::{DiffError, ExError, ExErrorKind, Result};
pub use group::{GroupDefinition, GroupDescriptor, GroupSchema};
pub use reconcile::GroupedDiffResult;
