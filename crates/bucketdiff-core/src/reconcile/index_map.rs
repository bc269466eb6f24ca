//! Index reconciliation: which previous record does each current record
//! correspond to?

use std::collections::BTreeSet;
use tracing::debug;

use super::grouped::GroupedDiffResult;
use crate::context::DiffSource;
use crate::diff::model::IndexMap;
use crate::errors::{DiffError, Result};

impl<S: DiffSource + ?Sized> GroupedDiffResult<'_, '_, S> {
    /// Build the map from current record index to previous record index.
    ///
    /// Only leader fields are consulted. An index whose leaders are all
    /// unchanged keeps its identity. An index with a changed leader value is
    /// matched against every other previous index whose leader values equal
    /// its current ones: one match is a move, none is an insertion.
    ///
    /// The map is rebuilt on every call and shares nothing across calls.
    ///
    /// # Errors
    ///
    /// - `AmbiguousIndexTransition` when more than one previous index
    ///   matches; the first such current index is reported
    /// - `GroupTooLarge` when a record limit is configured and exceeded
    pub fn create_index_map(&self) -> Result<IndexMap> {
        let counts = self.record_counts();
        if let Some(limit) = self.max_records {
            let records = counts.records.max(counts.prev_records);
            if records > limit {
                return Err(DiffError::GroupTooLarge {
                    group_id: self.group_id().to_string(),
                    records,
                    limit,
                });
            }
        }

        let changed = self.leader_changed_indices(counts.records);
        let mut entries = Vec::with_capacity(counts.records);
        for k in 0..counts.records {
            if !changed.contains(&k) {
                entries.push(Some(k));
                continue;
            }

            let candidates: Vec<usize> = (0..counts.prev_records)
                .filter(|&j| j != k && self.leaders_match(k, j))
                .collect();
            match candidates.as_slice() {
                [] => {
                    debug!(
                        group_id = self.group_id(),
                        index = k,
                        "record has no previous correspondence"
                    );
                    entries.push(None);
                }
                [j] => {
                    debug!(
                        group_id = self.group_id(),
                        index = k,
                        prev_index = *j,
                        "record moved"
                    );
                    entries.push(Some(*j));
                }
                _ => {
                    return Err(DiffError::AmbiguousIndexTransition {
                        group_id: self.group_id().to_string(),
                        index: k,
                        candidates,
                    });
                }
            }
        }

        Ok(IndexMap::from_entries(entries))
    }

    /// Current indices where some leader's raw diff reports a change and the
    /// leader still has a value there. A change with no current value is the
    /// tail of a shrinking sequence, not a move.
    fn leader_changed_indices(&self, records: usize) -> BTreeSet<usize> {
        let ctx = self.context();
        let mut changed = BTreeSet::new();
        for leader in ctx.leaders() {
            for k in 0..records {
                if self.raw.is_changed_at(leader, k) && self.current_value(leader, k).is_some() {
                    changed.insert(k);
                }
            }
        }
        changed
    }

    /// True when every leader's current value at `current` equals its
    /// previous value at `previous`.
    fn leaders_match(&self, current: usize, previous: usize) -> bool {
        self.context().leaders().iter().all(|leader| {
            self.current_value(leader, current) == self.previous_value(leader, previous)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::bucket::{Bucket, BucketAccessor};
    use crate::config::DiffConfig;
    use crate::context::{DiffContext, GroupedDiffContext};
    use crate::diff::model::IndexMap;
    use crate::differ::StrictSequenceDiffer;
    use crate::errors::DiffError;
    use crate::group::{GroupDefinition, GroupSchema};
    use crate::reconcile::GroupedDiffResult;

    fn index_map(head: &Bucket, prev: &Bucket, leaders: &[&str]) -> Result<IndexMap, DiffError> {
        let config = DiffConfig::default();
        let ctx = DiffContext::new(head, prev, &config);
        let members: Vec<&str> = head.field_names();
        let schema = GroupSchema::new().with_group(
            "g",
            GroupDefinition::new(members, leaders.iter().copied()),
        );
        let grouped = GroupedDiffContext::new(&ctx, &schema, "g")?;
        GroupedDiffResult::compute(&grouped, &StrictSequenceDiffer).create_index_map()
    }

    #[test]
    fn test_unchanged_leaders_give_identity() {
        let head = Bucket::new()
            .with_field("id", ["A", "B"])
            .with_field("amount", ["9", "2"]);
        let prev = Bucket::new()
            .with_field("id", ["A", "B"])
            .with_field("amount", ["1", "2"]);

        let map = index_map(&head, &prev, &["id"]).unwrap();
        assert_eq!(map, IndexMap::identity(2));
    }

    #[test]
    fn test_shrink_tail_is_not_a_record() {
        let head = Bucket::new().with_field("id", ["A"]);
        let prev = Bucket::new().with_field("id", ["A", "B"]);

        let map = index_map(&head, &prev, &["id"]).unwrap();
        assert_eq!(map.entries(), &[Some(0)]);
    }

    #[test]
    fn test_all_leaders_must_match() {
        let head = Bucket::new()
            .with_field("street", ["Main", "Main"])
            .with_field("zip", ["2", "1"]);
        let prev = Bucket::new()
            .with_field("street", ["Main", "Main"])
            .with_field("zip", ["1", "3"]);

        let map = index_map(&head, &prev, &["street", "zip"]).unwrap();
        // index 0 (Main, 2) matches nothing; index 1 (Main, 1) was at 0
        assert_eq!(map.entries(), &[None, Some(0)]);
    }

    #[test]
    fn test_ambiguity_reports_candidates() {
        let head = Bucket::new().with_field("id", ["B", "A"]);
        let prev = Bucket::new().with_field("id", ["A", "B", "B"]);

        let err = index_map(&head, &prev, &["id"]).unwrap_err();
        assert_eq!(
            err,
            DiffError::AmbiguousIndexTransition {
                group_id: "g".to_string(),
                index: 0,
                candidates: vec![1, 2],
            }
        );
    }
}
