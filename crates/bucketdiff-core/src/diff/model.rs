//! Diff output types.
//!
//! Collections use `BTreeMap` and sorted `Vec` for deterministic serialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-field, per-index changed flags.
pub type ChangedFlags = BTreeMap<String, Vec<bool>>;

/// Per-field, per-index value changes.
pub type ChangedValues = BTreeMap<String, Vec<ValueChange>>;

/// What happened at one index of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueChange {
    NoChange,
    /// `None` on either side means "no value" at that index.
    Changed {
        current: Option<Value>,
        previous: Option<Value>,
    },
}

impl ValueChange {
    /// `Changed` when the two sides differ, `NoChange` otherwise.
    pub fn compare(current: Option<&Value>, previous: Option<&Value>) -> Self {
        if current == previous {
            ValueChange::NoChange
        } else {
            ValueChange::Changed {
                current: current.cloned(),
                previous: previous.cloned(),
            }
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, ValueChange::Changed { .. })
    }
}

/// Correspondence from current record indices to previous ones.
///
/// Entry `k` is `Some(j)` when the record now at `k` was at `j` before
/// (`j == k` when it did not move) and `None` when it has no prior identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexMap {
    entries: Vec<Option<usize>>,
}

impl IndexMap {
    pub fn from_entries(entries: Vec<Option<usize>>) -> Self {
        Self { entries }
    }

    pub fn identity(len: usize) -> Self {
        Self {
            entries: (0..len).map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Previous index of the record now at `current`.
    ///
    /// `None` both for insertions and for indices past the map.
    pub fn previous_of(&self, current: usize) -> Option<usize> {
        self.entries.get(current).copied().flatten()
    }

    pub fn is_identity_at(&self, current: usize) -> bool {
        self.previous_of(current) == Some(current)
    }

    /// True when every record kept its index.
    pub fn is_identity(&self) -> bool {
        (0..self.entries.len()).all(|k| self.is_identity_at(k))
    }

    pub fn entries(&self) -> &[Option<usize>] {
        &self.entries
    }

    /// Previous indices below `prev_len` that no current index maps from,
    /// in ascending order.
    pub fn unmatched_previous(&self, prev_len: usize) -> Vec<usize> {
        let mut targeted = vec![false; prev_len];
        for j in self.entries.iter().flatten() {
            if let Some(slot) = targeted.get_mut(*j) {
                *slot = true;
            }
        }
        targeted
            .iter()
            .enumerate()
            .filter(|(_, hit)| !**hit)
            .map(|(j, _)| j)
            .collect()
    }

    /// `(current, previous)` pairs for records that changed position.
    pub fn moves(&self) -> Vec<(usize, usize)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(k, prev)| match prev {
                Some(j) if *j != k => Some((k, *j)),
                _ => None,
            })
            .collect()
    }

    /// Current indices with no prior identity.
    pub fn insertions(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, prev)| prev.is_none())
            .map(|(k, _)| k)
            .collect()
    }
}

/// A record that changed position between snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMove {
    pub current: usize,
    pub previous: usize,
}

/// A record that exists in the previous snapshot only, and the synthetic
/// trailing index its values were reported at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDeletion {
    pub previous: usize,
    pub reported_at: usize,
}

/// Fully reconciled diff of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledGroupDiff {
    pub group_id: String,
    pub index_map: IndexMap,
    pub moves: Vec<RecordMove>,
    pub insertions: Vec<usize>,
    pub deletions: Vec<RecordDeletion>,
    pub changed_values: ChangedValues,
    pub changed: ChangedFlags,
}

impl ReconciledGroupDiff {
    /// True when some field reports a genuine value change.
    pub fn has_changes(&self) -> bool {
        self.changed.values().any(|flags| flags.iter().any(|c| *c))
    }
}

/// Reconciled diffs of every group of a bucket, keyed by group id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketDiffReport {
    pub groups: BTreeMap<String, ReconciledGroupDiff>,
}

impl BucketDiffReport {
    pub fn has_changes(&self) -> bool {
        self.groups.values().any(ReconciledGroupDiff::has_changes)
    }
}

/// Boolean view of a value-change map.
pub fn flags_of(values: &ChangedValues) -> ChangedFlags {
    values
        .iter()
        .map(|(field, entries)| {
            (
                field.clone(),
                entries.iter().map(ValueChange::is_changed).collect(),
            )
        })
        .collect()
}
