use bucketdiff_core::errors::{DiffError, ExError, ExErrorKind};
use bucketdiff_core::{Bucket, DiffConfig, GroupSchema};
use std::path::Path;

#[test]
fn test_group_not_found_verifiable_by_kind() {
    let err = DiffError::GroupNotFound {
        group_id: "unknown".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::GroupNotFound);
    assert_eq!(ex_err.code(), "ERR_GROUP_NOT_FOUND");
    assert_eq!(ex_err.group_id(), Some("unknown"));
}

#[test]
fn test_leader_not_member_carries_field() {
    let err = DiffError::LeaderNotMember {
        group_id: "vehicles".to_string(),
        field: "vin".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidGroup);
    assert_eq!(ex_err.field(), Some("vin"));
    assert!(ex_err.message().contains("not a group member"));
}

#[test]
fn test_limit_exceeded_message_names_counts() {
    let err = DiffError::GroupTooLarge {
        group_id: "g".to_string(),
        records: 12,
        limit: 10,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::LimitExceeded);
    assert_eq!(ex_err.message(), "12 records exceed limit of 10");
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::GroupNotFound, "ERR_GROUP_NOT_FOUND"),
        (ExErrorKind::InvalidGroup, "ERR_INVALID_GROUP"),
        (ExErrorKind::AmbiguousTransition, "ERR_AMBIGUOUS_TRANSITION"),
        (ExErrorKind::LimitExceeded, "ERR_LIMIT_EXCEEDED"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_malformed_inputs_map_to_stable_kinds() {
    let not_object = Bucket::from_json_str("[1, 2]").unwrap_err();
    assert_eq!(ExError::from(not_object).kind(), ExErrorKind::InvalidInput);

    let bad_json = Bucket::from_json_str("{").unwrap_err();
    assert_eq!(ExError::from(bad_json).kind(), ExErrorKind::Serialization);

    let bad_toml = DiffConfig::from_toml_str("unknown_key = 1").unwrap_err();
    assert_eq!(ExError::from(bad_toml).code(), "ERR_SERIALIZATION");

    let bad_groups = GroupSchema::from_json_str(r#"{"groups": {"g": {"members": 3}}}"#).unwrap_err();
    assert!(matches!(bad_groups, DiffError::Serialization { .. }));
}

#[test]
fn test_unreadable_files_map_to_io_with_path() {
    let missing = Path::new("does/not/exist/head.json");

    let err = Bucket::from_json_file(missing).unwrap_err();
    assert!(matches!(err, DiffError::Io { .. }));
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.code(), "ERR_IO");
    assert!(ex_err.message().contains("does/not/exist/head.json"));

    let err = GroupSchema::from_file(Path::new("does/not/exist/groups.toml")).unwrap_err();
    assert_eq!(ExError::from(err).kind(), ExErrorKind::Io);

    let err = DiffConfig::from_toml_file(Path::new("does/not/exist/diff.toml")).unwrap_err();
    assert_eq!(ExError::from(err).kind(), ExErrorKind::Io);
}
