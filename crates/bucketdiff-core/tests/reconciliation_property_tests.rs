//! Property tests for index reconciliation.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use bucketdiff_core::{diff_group, Bucket, IndexMap, ValueChange};
use common::{config, single_group};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn rows(ids: &[String], amounts: &[u32]) -> Bucket {
    Bucket::new()
        .with_field("id", ids.iter().cloned())
        .with_field("amount", amounts.iter().copied())
}

/// Distinct leader values and a permutation of them.
fn ids_and_permutation() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    proptest::collection::btree_set("[a-z]{1,4}", 0..8)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_flat_map(|ids| (Just(ids.clone()), Just(ids).prop_shuffle()))
}

proptest! {
    #[test]
    fn prop_same_leaders_give_identity(
        ids in proptest::collection::vec("[a-c]", 0..8),
        head_amounts in proptest::collection::vec(0u32..3, 8),
        prev_amounts in proptest::collection::vec(0u32..3, 8),
    ) {
        let n = ids.len();
        let head = rows(&ids, &head_amounts[..n]);
        let prev = rows(&ids, &prev_amounts[..n]);
        let schema = single_group("g", &["id", "amount"], &["id"]);

        let diff = diff_group(&head, &prev, &schema, "g", &config()).unwrap();

        prop_assert_eq!(&diff.index_map, &IndexMap::identity(n));
        // With identity, every value change is the positional one.
        for k in 0..n {
            let expected = head_amounts[k] != prev_amounts[k];
            prop_assert_eq!(diff.changed["amount"][k], expected);
        }
        prop_assert!(diff.deletions.is_empty());
    }

    #[test]
    fn prop_pure_permutation_has_no_changes((prev_ids, head_ids) in ids_and_permutation()) {
        // Each record carries an amount derived from its id, so a permutation
        // moves whole records.
        let amount = |id: &String| id.len() as u32 * 7 + u32::from(id.as_bytes()[0]);
        let prev_amounts: Vec<u32> = prev_ids.iter().map(amount).collect();
        let head_amounts: Vec<u32> = head_ids.iter().map(amount).collect();
        let head = rows(&head_ids, &head_amounts);
        let prev = rows(&prev_ids, &prev_amounts);
        let schema = single_group("g", &["id", "amount"], &["id"]);

        let diff = diff_group(&head, &prev, &schema, "g", &config()).unwrap();

        prop_assert!(!diff.has_changes());
        for (k, id) in head_ids.iter().enumerate() {
            let j = diff.index_map.previous_of(k).unwrap();
            prop_assert_eq!(&prev_ids[j], id);
        }
        prop_assert!(diff.insertions.is_empty());
        prop_assert!(diff.deletions.is_empty());
    }

    #[test]
    fn prop_removed_records_are_reported_once(
        (prev_ids, _) in ids_and_permutation(),
        keep in proptest::collection::vec(any::<bool>(), 8),
    ) {
        let head_ids: Vec<String> = prev_ids
            .iter()
            .zip(&keep)
            .filter(|(_, k)| **k)
            .map(|(id, _)| id.clone())
            .collect();
        let head = Bucket::new().with_field("id", head_ids.iter().cloned());
        let prev = Bucket::new().with_field("id", prev_ids.iter().cloned());
        let schema = single_group("g", &["id"], &["id"]);

        let diff = diff_group(&head, &prev, &schema, "g", &config()).unwrap();

        let removed: BTreeSet<usize> = keep
            .iter()
            .take(prev_ids.len())
            .enumerate()
            .filter(|(_, k)| !**k)
            .map(|(j, _)| j)
            .collect();
        let reported: BTreeSet<usize> = diff.deletions.iter().map(|d| d.previous).collect();
        prop_assert_eq!(reported, removed);

        // No surviving record is reported as changed.
        let entries = diff.changed_values.get("id").cloned().unwrap_or_default();
        for entry in entries.iter().take(head_ids.len()) {
            prop_assert_eq!(entry, &ValueChange::NoChange);
        }
    }
}
