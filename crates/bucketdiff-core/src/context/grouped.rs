//! Group-restricted diff context.

use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

use super::DiffSource;
use crate::errors::{DiffError, Result};
use crate::group::GroupDescriptor;

/// Restricts a [`DiffSource`] to the member fields of one group and answers
/// leader membership queries.
///
/// Construction validates the group: it must exist, declare at least one
/// leader, and every leader must be a member.
pub struct GroupedDiffContext<'a, S: DiffSource + ?Sized> {
    inner: &'a S,
    group_id: String,
    members: BTreeSet<String>,
    leaders: Vec<String>,
    leader_set: HashSet<String>,
}

impl<'a, S: DiffSource + ?Sized> GroupedDiffContext<'a, S> {
    /// # Errors
    ///
    /// - `GroupNotFound` if the descriptor does not know `group_id`
    /// - `GroupWithoutLeaders` if the group has no leader fields
    /// - `LeaderNotMember` if a leader is not one of the group's members
    pub fn new(inner: &'a S, descriptor: &dyn GroupDescriptor, group_id: &str) -> Result<Self> {
        let not_found = || DiffError::GroupNotFound {
            group_id: group_id.to_string(),
        };
        let members = descriptor.group_members(group_id).ok_or_else(not_found)?;
        let leaders = descriptor.group_leaders(group_id).ok_or_else(not_found)?;

        if leaders.is_empty() {
            return Err(DiffError::GroupWithoutLeaders {
                group_id: group_id.to_string(),
            });
        }
        if let Some(stray) = leaders.iter().find(|l| !members.contains(*l)) {
            return Err(DiffError::LeaderNotMember {
                group_id: group_id.to_string(),
                field: stray.clone(),
            });
        }

        let leader_set = leaders.iter().cloned().collect();
        Ok(Self {
            inner,
            group_id: group_id.to_string(),
            members,
            leaders,
            leader_set,
        })
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn is_group_leader(&self, field: &str) -> bool {
        self.leader_set.contains(field)
    }

    pub fn is_group_member(&self, field: &str) -> bool {
        self.members.contains(field)
    }

    /// Leader fields in declaration order.
    pub fn leaders(&self) -> &[String] {
        &self.leaders
    }

    pub fn members(&self) -> &BTreeSet<String> {
        &self.members
    }
}

impl<S: DiffSource + ?Sized> DiffSource for GroupedDiffContext<'_, S> {
    fn for_each_field(&self, visit: &mut dyn FnMut(&str, &[Value], &[Value])) {
        self.inner.for_each_field(&mut |field, head, prev| {
            if self.is_group_member(field) {
                visit(field, head, prev);
            }
        });
    }

    fn field_values(&self, field: &str) -> (&[Value], &[Value]) {
        self.inner.field_values(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::Bucket;
    use crate::config::DiffConfig;
    use crate::context::DiffContext;
    use crate::group::{GroupDefinition, GroupSchema};

    fn schema() -> GroupSchema {
        GroupSchema::new()
            .with_group("vehicles", GroupDefinition::new(["vin", "make"], ["vin"]))
            .with_group("empty", GroupDefinition::new(["vin"], Vec::<String>::new()))
            .with_group("stray", GroupDefinition::new(["make"], ["vin"]))
    }

    #[test]
    fn test_filters_to_members() {
        let head = Bucket::new()
            .with_field("vin", ["V1"])
            .with_field("make", ["Ford"])
            .with_field("street", ["Main"]);
        let prev = head.clone();
        let config = DiffConfig::default();
        let ctx = DiffContext::new(&head, &prev, &config);
        let schema = schema();
        let grouped = GroupedDiffContext::new(&ctx, &schema, "vehicles").unwrap();

        let mut seen = Vec::new();
        grouped.for_each_field(&mut |field, _, _| seen.push(field.to_string()));

        assert_eq!(seen, vec!["make".to_string(), "vin".to_string()]);
        assert!(grouped.is_group_leader("vin"));
        assert!(!grouped.is_group_leader("make"));
        assert!(grouped.is_group_member("make"));
        assert!(!grouped.is_group_member("street"));
        // Lookups outside the group still forward
        assert_eq!(grouped.field_values("street").0.len(), 1);
    }

    #[test]
    fn test_construction_errors() {
        let bucket = Bucket::new();
        let config = DiffConfig::default();
        let ctx = DiffContext::new(&bucket, &bucket, &config);
        let schema = schema();

        let err = GroupedDiffContext::new(&ctx, &schema, "missing").err().unwrap();
        assert_eq!(
            err,
            DiffError::GroupNotFound {
                group_id: "missing".to_string()
            }
        );

        let err = GroupedDiffContext::new(&ctx, &schema, "empty").err().unwrap();
        assert!(matches!(err, DiffError::GroupWithoutLeaders { .. }));

        let err = GroupedDiffContext::new(&ctx, &schema, "stray").err().unwrap();
        assert_eq!(
            err,
            DiffError::LeaderNotMember {
                group_id: "stray".to_string(),
                field: "vin".to_string()
            }
        );
    }
}
