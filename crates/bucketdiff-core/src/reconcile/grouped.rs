//! Grouped diff result: the raw diff of a group reinterpreted against the
//! reconstructed record identities.

use serde_json::Value;
use tracing::debug;

use crate::context::{DiffSource, GroupedDiffContext};
use crate::diff::model::{
    flags_of, ChangedFlags, ChangedValues, IndexMap, RecordDeletion, RecordMove,
    ReconciledGroupDiff, ValueChange,
};
use crate::diff::standard::{standard_diff, DescribeChanges, DiffResult};
use crate::differ::ScalarSequenceDiffer;
use crate::errors::Result;

/// Raw diff of one group plus everything needed to reconcile it.
pub struct GroupedDiffResult<'s, 'c, S: DiffSource + ?Sized> {
    pub(super) raw: DiffResult<'s, GroupedDiffContext<'c, S>>,
    /// `(current, previous)` pairs of every raw-changed index, computed once.
    pub(super) raw_values: ChangedValues,
    pub(super) max_records: Option<usize>,
}

/// Record extent of a group on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RecordCounts {
    /// Longest current leader sequence.
    pub records: usize,
    /// Longest previous leader sequence.
    pub prev_records: usize,
    /// Longest current sequence among all member fields.
    pub extent: usize,
}

impl<'s, 'c, S: DiffSource + ?Sized> GroupedDiffResult<'s, 'c, S> {
    /// Wrap an existing raw diff of a grouped context.
    pub fn new(raw: DiffResult<'s, GroupedDiffContext<'c, S>>) -> Self {
        let raw_values = raw
            .changed()
            .keys()
            .map(|field| (field.clone(), raw.field_changed_values(field)))
            .collect();
        Self {
            raw,
            raw_values,
            max_records: None,
        }
    }

    /// Run the standard diff over a grouped context and wrap the result.
    pub fn compute(
        context: &'s GroupedDiffContext<'c, S>,
        differ: &dyn ScalarSequenceDiffer,
    ) -> Self {
        Self::new(standard_diff(context, differ))
    }

    /// Refuse reconciliation of groups larger than `limit` records.
    pub fn with_max_records(mut self, limit: Option<usize>) -> Self {
        self.max_records = limit;
        self
    }

    pub fn context(&self) -> &'s GroupedDiffContext<'c, S> {
        self.raw.source()
    }

    pub fn group_id(&self) -> &str {
        self.context().group_id()
    }

    /// The naive per-index diff this result reinterprets.
    pub fn raw(&self) -> &DiffResult<'s, GroupedDiffContext<'c, S>> {
        &self.raw
    }

    pub(super) fn record_counts(&self) -> RecordCounts {
        let ctx = self.context();
        let mut counts = RecordCounts {
            records: 0,
            prev_records: 0,
            extent: 0,
        };
        for leader in ctx.leaders() {
            let (head, prev) = ctx.field_values(leader);
            counts.records = counts.records.max(head.len());
            counts.prev_records = counts.prev_records.max(prev.len());
        }
        for field in self.raw.changed().keys() {
            let (head, _) = ctx.field_values(field);
            counts.extent = counts.extent.max(head.len());
        }
        counts.extent = counts.extent.max(counts.records);
        counts
    }

    /// Current value of `field` at `index`, from the raw diff when it has
    /// one for that index.
    pub(super) fn current_value(&self, field: &str, index: usize) -> Option<&Value> {
        match self.raw_values.get(field).and_then(|v| v.get(index)) {
            Some(ValueChange::Changed { current, .. }) => current.as_ref(),
            _ => self.context().field_values(field).0.get(index),
        }
    }

    /// Previous value of `field` at `index`, from the raw diff when it has
    /// one for that index.
    pub(super) fn previous_value(&self, field: &str, index: usize) -> Option<&Value> {
        match self.raw_values.get(field).and_then(|v| v.get(index)) {
            Some(ValueChange::Changed { previous, .. }) => previous.as_ref(),
            _ => self.context().field_values(field).1.get(index),
        }
    }

    fn field_has_raw_change(&self, field: &str) -> bool {
        self.raw
            .changed()
            .get(field)
            .is_some_and(|flags| flags.iter().any(|c| *c))
    }

    /// Reinterpret the raw diff of one field against an index map.
    fn reconcile_field(
        &self,
        field: &str,
        map: &IndexMap,
        counts: RecordCounts,
        deleted: &[usize],
    ) -> Vec<ValueChange> {
        let raw = self.raw_values.get(field).map(Vec::as_slice).unwrap_or(&[]);
        let raw_entry = |k: usize| raw.get(k).cloned().unwrap_or(ValueChange::NoChange);

        let mut out = Vec::with_capacity(counts.extent + deleted.len());
        for k in 0..map.len() {
            if map.is_identity_at(k) {
                out.push(raw_entry(k));
                continue;
            }
            let current = self.current_value(field, k);
            let previous = map
                .previous_of(k)
                .and_then(|j| self.previous_value(field, j));
            out.push(ValueChange::compare(current, previous));
        }

        // Past the last leader record there is no previous identity. A raw
        // entry with no current value here is a shrink tail: the previous
        // record is either matched or reported as a deletion below.
        for k in map.len()..counts.extent {
            match self.current_value(field, k) {
                Some(current) => out.push(ValueChange::compare(Some(current), None)),
                None => out.push(ValueChange::NoChange),
            }
        }

        if self.field_has_raw_change(field) {
            for j in deleted {
                out.push(ValueChange::compare(None, self.previous_value(field, *j)));
            }
        }
        out
    }

    fn reconcile_values(&self, map: &IndexMap) -> (ChangedValues, Vec<RecordDeletion>) {
        let counts = self.record_counts();
        let deleted = map.unmatched_previous(counts.prev_records);
        for j in &deleted {
            debug!(
                group_id = self.group_id(),
                prev_index = *j,
                "previous record has no current correspondence"
            );
        }

        let values = self
            .raw
            .changed()
            .keys()
            .map(|field| {
                (
                    field.clone(),
                    self.reconcile_field(field, map, counts, &deleted),
                )
            })
            .collect();

        let deletions = deleted
            .iter()
            .enumerate()
            .map(|(offset, j)| RecordDeletion {
                previous: *j,
                reported_at: counts.extent + offset,
            })
            .collect();
        (values, deletions)
    }

    /// Reconcile the group in one pass: index map, corrected values, flags,
    /// and the moves/insertions/deletions they imply.
    ///
    /// # Errors
    ///
    /// - `AmbiguousIndexTransition` if leader values cannot tell records apart
    /// - `GroupTooLarge` if a record limit is set and exceeded
    pub fn reconcile(&self) -> Result<ReconciledGroupDiff> {
        let index_map = self.create_index_map()?;
        let (changed_values, deletions) = self.reconcile_values(&index_map);
        let changed = flags_of(&changed_values);

        Ok(ReconciledGroupDiff {
            group_id: self.group_id().to_string(),
            moves: index_map
                .moves()
                .into_iter()
                .map(|(current, previous)| RecordMove { current, previous })
                .collect(),
            insertions: index_map.insertions(),
            deletions,
            index_map,
            changed_values,
            changed,
        })
    }
}

impl<S: DiffSource + ?Sized> DescribeChanges for GroupedDiffResult<'_, '_, S> {
    fn describe_changed(&self) -> Result<ChangedFlags> {
        Ok(flags_of(&self.describe_changed_values()?))
    }

    fn describe_changed_values(&self) -> Result<ChangedValues> {
        let map = self.create_index_map()?;
        Ok(self.reconcile_values(&map).0)
    }
}
