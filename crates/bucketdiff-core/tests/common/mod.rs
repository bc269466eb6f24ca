use bucketdiff_core::{Bucket, DiffConfig, GroupDefinition, GroupSchema};
use serde_json::Value;

/// Build a bucket from a JSON object of arrays
#[allow(dead_code)]
pub fn bucket(json: Value) -> Bucket {
    Bucket::from_json_value(json).unwrap()
}

/// Schema with a single group whose members are `members` and leaders `leaders`
#[allow(dead_code)]
pub fn single_group(group_id: &str, members: &[&str], leaders: &[&str]) -> GroupSchema {
    GroupSchema::new().with_group(
        group_id,
        GroupDefinition::new(members.iter().copied(), leaders.iter().copied()),
    )
}

/// Default configuration
#[allow(dead_code)]
pub fn config() -> DiffConfig {
    DiffConfig::default()
}
