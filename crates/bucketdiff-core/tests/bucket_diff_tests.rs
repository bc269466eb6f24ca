//! Whole-bucket diffs: several groups, group validation, configuration and
//! report serialization.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use bucketdiff_core::diff::render_report_summary;
use bucketdiff_core::{
    diff_bucket, diff_group, Bucket, BucketDiffReport, DiffConfig, DiffError, ExError,
    ExErrorKind, GroupDefinition, GroupSchema, ValueChange,
};
use common::{bucket, config, single_group};
use serde_json::json;

fn two_group_schema() -> GroupSchema {
    GroupSchema::new()
        .with_group(
            "payments",
            GroupDefinition::new(["pay_id", "amount"], ["pay_id"]),
        )
        .with_group(
            "vehicles",
            GroupDefinition::new(["plate", "make"], ["plate"]),
        )
}

#[test]
fn test_groups_reconcile_independently() {
    let prev = bucket(json!({
        "pay_id": ["p1", "p2"], "amount": [10, 20],
        "plate": ["X1", "Y2"], "make": ["VW", "BMW"]
    }));
    let head = bucket(json!({
        "pay_id": ["p2", "p1"], "amount": [20, 10],
        "plate": ["X1", "Y2"], "make": ["VW", "Audi"]
    }));

    let report = diff_bucket(&head, &prev, &two_group_schema(), &config()).unwrap();

    assert_eq!(
        report.groups.keys().collect::<Vec<_>>(),
        vec!["payments", "vehicles"]
    );
    assert!(!report.groups["payments"].has_changes());
    assert_eq!(report.groups["payments"].moves.len(), 2);
    assert_eq!(
        report.groups["vehicles"].changed_values["make"],
        vec![
            ValueChange::NoChange,
            ValueChange::Changed {
                current: Some(json!("Audi")),
                previous: Some(json!("BMW")),
            },
        ]
    );
    assert!(report.has_changes());
}

#[test]
fn test_one_ambiguous_group_fails_the_bucket() {
    let prev = bucket(json!({
        "pay_id": ["p1", "p2", "p2"], "amount": [10, 20, 30],
        "plate": ["X1"], "make": ["VW"]
    }));
    let head = bucket(json!({
        "pay_id": ["p2"], "amount": [20],
        "plate": ["X1"], "make": ["VW"]
    }));

    let err = diff_bucket(&head, &prev, &two_group_schema(), &config()).unwrap_err();

    assert_eq!(
        err,
        DiffError::AmbiguousIndexTransition {
            group_id: "payments".to_string(),
            index: 0,
            candidates: vec![1, 2],
        }
    );
}

#[test]
fn test_empty_descriptor_gives_empty_report() {
    let empty = Bucket::new();
    let report = diff_bucket(&empty, &empty, &GroupSchema::new(), &config()).unwrap();
    assert_eq!(report, BucketDiffReport::default());
}

// ---------------------------------------------------------------------------
// Group validation
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_group() {
    let empty = Bucket::new();
    let err = diff_group(&empty, &empty, &GroupSchema::new(), "nope", &config()).unwrap_err();
    assert_eq!(
        err,
        DiffError::GroupNotFound {
            group_id: "nope".to_string()
        }
    );
    assert_eq!(ExError::from(err).kind(), ExErrorKind::GroupNotFound);
}

#[test]
fn test_group_without_leaders() {
    let schema = single_group("g", &["a"], &[]);
    let empty = Bucket::new();
    let err = diff_group(&empty, &empty, &schema, "g", &config()).unwrap_err();
    assert!(matches!(err, DiffError::GroupWithoutLeaders { .. }));
    assert_eq!(ExError::from(err).code(), "ERR_INVALID_GROUP");
}

#[test]
fn test_leader_outside_members() {
    let schema = single_group("g", &["a"], &["b"]);
    let empty = Bucket::new();
    let err = diff_group(&empty, &empty, &schema, "g", &config()).unwrap_err();
    assert_eq!(
        err,
        DiffError::LeaderNotMember {
            group_id: "g".to_string(),
            field: "b".to_string(),
        }
    );
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_record_limit() {
    let prev = bucket(json!({"id": ["A", "B", "C"]}));
    let head = bucket(json!({"id": ["A"]}));
    let schema = single_group("g", &["id"], &["id"]);
    let config = DiffConfig::default().with_max_group_records(2);

    let err = diff_group(&head, &prev, &schema, "g", &config).unwrap_err();

    assert_eq!(
        err,
        DiffError::GroupTooLarge {
            group_id: "g".to_string(),
            records: 3,
            limit: 2,
        }
    );
    assert_eq!(ExError::from(err).code(), "ERR_LIMIT_EXCEEDED");
}

#[test]
fn test_custom_delete_marker_from_toml() {
    let config = DiffConfig::from_toml_str("delete_marker = \"DEL\"").unwrap();
    let prev = bucket(json!({"id": ["A", "B"]}));
    let head = bucket(json!({"id": ["A", "DEL", "__delete__"]}));
    let schema = single_group("g", &["id"], &["id"]);

    let diff = diff_group(&head, &prev, &schema, "g", &config).unwrap();

    assert_eq!(diff.index_map.entries(), &[Some(0)]);
    assert_eq!(diff.deletions.len(), 1);
}

#[test]
fn test_disabled_delete_marker_keeps_values() {
    let config = DiffConfig::default().with_delete_marker(None);
    let prev = bucket(json!({"id": ["A"]}));
    let head = bucket(json!({"id": ["A", "__delete__"]}));
    let schema = single_group("g", &["id"], &["id"]);

    let diff = diff_group(&head, &prev, &schema, "g", &config).unwrap();

    assert_eq!(diff.index_map.entries(), &[Some(0), None]);
    assert_eq!(diff.insertions, vec![1]);
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[test]
fn test_report_serializes_to_stable_json() {
    let prev = bucket(json!({"pay_id": ["p1", "p2"], "amount": [10, 20]}));
    let head = bucket(json!({"pay_id": ["p2"], "amount": [20]}));
    let schema = single_group("payments", &["pay_id", "amount"], &["pay_id"]);

    let report = diff_bucket(&head, &prev, &schema, &config()).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["groups"]["payments"]["index_map"], json!([1]));
    assert_eq!(
        value["groups"]["payments"]["changed_values"]["amount"],
        json!([
            {"kind": "no_change"},
            {"kind": "changed", "current": null, "previous": 10}
        ])
    );
    assert_eq!(
        value["groups"]["payments"]["deletions"],
        json!([{"previous": 0, "reported_at": 1}])
    );

    let back: BucketDiffReport = serde_json::from_value(value).unwrap();
    assert_eq!(back, report);
}

#[test]
fn test_report_summary_mentions_every_group() {
    let prev = bucket(json!({
        "pay_id": ["p1"], "amount": [10],
        "plate": ["X1"], "make": ["VW"]
    }));
    let head = bucket(json!({
        "pay_id": ["p1"], "amount": [11],
        "plate": ["X1"], "make": ["VW"]
    }));

    let report = diff_bucket(&head, &prev, &two_group_schema(), &config()).unwrap();
    let summary = render_report_summary(&report);

    assert!(summary.starts_with("# Bucket Diff"));
    assert!(summary.contains("## Group `payments`"));
    assert!(summary.contains("| `amount` | 0 | `10` | `11` |"));
    assert!(summary.contains("## Group `vehicles`"));
    assert!(summary.contains("_No changes detected._"));
}
