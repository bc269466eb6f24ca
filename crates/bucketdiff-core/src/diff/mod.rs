//! Bucket diffing.
//!
//! ## Entry point
//!
//! ```
//! use bucketdiff_core::bucket::Bucket;
//! use bucketdiff_core::config::DiffConfig;
//! use bucketdiff_core::diff::diff_group;
//! use bucketdiff_core::group::{GroupDefinition, GroupSchema};
//!
//! let prev = Bucket::new()
//!     .with_field("id", ["A", "B", "C"])
//!     .with_field("amount", ["1", "2", "3"]);
//! let head = Bucket::new()
//!     .with_field("id", ["B", "C"])
//!     .with_field("amount", ["2", "3"]);
//! let schema = GroupSchema::new()
//!     .with_group("payments", GroupDefinition::new(["id", "amount"], ["id"]));
//!
//! let diff = diff_group(&head, &prev, &schema, "payments", &DiffConfig::default()).unwrap();
//! assert_eq!(diff.changed["amount"], vec![false, false, true]);
//! ```
//!
//! ## Layers
//!
//! - [`standard`]: the naive per-index diff ([`standard_diff`]).
//! - [`crate::reconcile`]: index reconciliation over a group's leader fields.
//! - [`engine`]: one-call entry points with operation logging.
//! - [`human_summary`]: Markdown rendering of reconciled diffs.

pub mod engine;
pub mod human_summary;
pub mod model;
pub mod standard;

pub use engine::{diff_bucket, diff_group, diff_group_with};
pub use human_summary::{render_human_summary, render_report_summary};
pub use model::{BucketDiffReport, IndexMap, ReconciledGroupDiff, ValueChange};
pub use standard::{standard_diff, DescribeChanges, DiffResult};
