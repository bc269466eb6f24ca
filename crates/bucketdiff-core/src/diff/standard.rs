//! Naive per-index diff, unaware of groups or record identity.

use std::collections::BTreeMap;

use crate::context::DiffSource;
use crate::diff::model::{ChangedFlags, ChangedValues, ValueChange};
use crate::differ::ScalarSequenceDiffer;
use crate::errors::Result;

/// Change descriptions exposed to hosts.
pub trait DescribeChanges {
    /// `{field -> [changed?]}`
    ///
    /// # Errors
    ///
    /// Implementations that reconcile indices propagate reconciliation failures.
    fn describe_changed(&self) -> Result<ChangedFlags>;

    /// `{field -> [NoChange | Changed(current, previous)]}`
    ///
    /// # Errors
    ///
    /// Implementations that reconcile indices propagate reconciliation failures.
    fn describe_changed_values(&self) -> Result<ChangedValues>;
}

/// Raw diff packaged with the source it was computed from.
pub struct DiffResult<'s, S: DiffSource + ?Sized> {
    source: &'s S,
    changed: ChangedFlags,
}

impl<'s, S: DiffSource + ?Sized> DiffResult<'s, S> {
    pub fn new(source: &'s S, changed: ChangedFlags) -> Self {
        Self { source, changed }
    }

    pub fn source(&self) -> &'s S {
        self.source
    }

    /// Raw changed flags, by reference.
    pub fn changed(&self) -> &ChangedFlags {
        &self.changed
    }

    /// Raw flag for one field and index; `false` past the field's sequence
    /// and for fields without a raw entry.
    pub fn is_changed_at(&self, field: &str, index: usize) -> bool {
        self.changed
            .get(field)
            .and_then(|flags| flags.get(index))
            .copied()
            .unwrap_or(false)
    }

    /// `(current, previous)` values of every changed index of one field.
    pub fn field_changed_values(&self, field: &str) -> Vec<ValueChange> {
        let Some(flags) = self.changed.get(field) else {
            return Vec::new();
        };
        let (head, prev) = self.source.field_values(field);
        flags
            .iter()
            .enumerate()
            .map(|(k, changed)| {
                if *changed {
                    ValueChange::Changed {
                        current: head.get(k).cloned(),
                        previous: prev.get(k).cloned(),
                    }
                } else {
                    ValueChange::NoChange
                }
            })
            .collect()
    }
}

impl<S: DiffSource + ?Sized> DescribeChanges for DiffResult<'_, S> {
    fn describe_changed(&self) -> Result<ChangedFlags> {
        Ok(self.changed.clone())
    }

    fn describe_changed_values(&self) -> Result<ChangedValues> {
        Ok(self
            .changed
            .keys()
            .map(|field| (field.clone(), self.field_changed_values(field)))
            .collect())
    }
}

/// Run the scalar differ over every field the source surfaces.
///
/// Each field gets `max(len(head), len(prev))` flags; the differ's output
/// is padded or cut to that length.
pub fn standard_diff<'s, S>(source: &'s S, differ: &dyn ScalarSequenceDiffer) -> DiffResult<'s, S>
where
    S: DiffSource + ?Sized,
{
    let mut changed = BTreeMap::new();
    source.for_each_field(&mut |field, head, prev| {
        let len = head.len().max(prev.len());
        let marks = differ.diff(head, prev);
        let flags: Vec<bool> = (0..len)
            .map(|k| marks.get(k).copied().unwrap_or(false))
            .collect();
        changed.insert(field.to_string(), flags);
    });
    DiffResult::new(source, changed)
}
