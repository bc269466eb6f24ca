//! Diff contexts: paired head/prev snapshots exposed field by field.

pub mod grouped;

use serde_json::Value;
use std::collections::BTreeSet;

use crate::bucket::{truncate_at_delete_marker, BucketAccessor};
use crate::config::DiffConfig;

pub use grouped::GroupedDiffContext;

/// Field-wise access to two snapshots.
///
/// All slices are effective sequences: already cut at the delete marker.
pub trait DiffSource {
    /// Visit every field once with its `(head, prev)` sequences.
    fn for_each_field(&self, visit: &mut dyn FnMut(&str, &[Value], &[Value]));

    /// Ad-hoc lookup of a field's `(head, prev)` sequences.
    fn field_values(&self, field: &str) -> (&[Value], &[Value]);
}

/// Pairs the current ("head") and previous ("prev") snapshot of a bucket.
pub struct DiffContext<'a> {
    head: &'a dyn BucketAccessor,
    prev: &'a dyn BucketAccessor,
    delete_marker: Option<Value>,
}

impl<'a> DiffContext<'a> {
    pub fn new(
        head: &'a dyn BucketAccessor,
        prev: &'a dyn BucketAccessor,
        config: &DiffConfig,
    ) -> Self {
        Self {
            head,
            prev,
            delete_marker: config.effective_delete_marker().cloned(),
        }
    }

    /// Sorted union of both snapshots' field names.
    pub fn field_names(&self) -> BTreeSet<&str> {
        self.head
            .field_names()
            .into_iter()
            .chain(self.prev.field_names())
            .collect()
    }
}

impl DiffSource for DiffContext<'_> {
    fn for_each_field(&self, visit: &mut dyn FnMut(&str, &[Value], &[Value])) {
        for field in self.field_names() {
            let (head, prev) = self.field_values(field);
            visit(field, head, prev);
        }
    }

    fn field_values(&self, field: &str) -> (&[Value], &[Value]) {
        let marker = self.delete_marker.as_ref();
        (
            truncate_at_delete_marker(self.head.data_by_name(field), marker),
            truncate_at_delete_marker(self.prev.data_by_name(field), marker),
        )
    }
}
