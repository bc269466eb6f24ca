//! Bucket diff entry points.
//!
//! [`diff_group`] reconciles one group of a bucket pair; [`diff_bucket`]
//! reconciles every group a descriptor declares.

use std::collections::BTreeMap;

use crate::bucket::BucketAccessor;
use crate::config::DiffConfig;
use crate::context::{DiffContext, GroupedDiffContext};
use crate::diff::model::{BucketDiffReport, ReconciledGroupDiff};
use crate::differ::{ScalarSequenceDiffer, StrictSequenceDiffer};
use crate::errors::Result;
use crate::group::GroupDescriptor;
use crate::reconcile::GroupedDiffResult;
use crate::{log_op_end, log_op_error, log_op_start};

/// Reconcile one group using [`StrictSequenceDiffer`].
///
/// # Errors
///
/// - `GroupNotFound`, `GroupWithoutLeaders`, `LeaderNotMember` for a bad group
/// - `AmbiguousIndexTransition` if leader values cannot tell records apart
/// - `GroupTooLarge` if `config.max_group_records` is exceeded
pub fn diff_group(
    head: &dyn BucketAccessor,
    prev: &dyn BucketAccessor,
    descriptor: &dyn GroupDescriptor,
    group_id: &str,
    config: &DiffConfig,
) -> Result<ReconciledGroupDiff> {
    diff_group_with(head, prev, descriptor, group_id, config, &StrictSequenceDiffer)
}

/// Reconcile one group with a caller-supplied scalar differ.
///
/// # Errors
///
/// See [`diff_group`].
pub fn diff_group_with(
    head: &dyn BucketAccessor,
    prev: &dyn BucketAccessor,
    descriptor: &dyn GroupDescriptor,
    group_id: &str,
    config: &DiffConfig,
    differ: &dyn ScalarSequenceDiffer,
) -> Result<ReconciledGroupDiff> {
    log_op_start!("diff_group", group_id = group_id);
    let start = std::time::Instant::now();

    let result = diff_group_impl(head, prev, descriptor, group_id, config, differ).map_err(|e| {
        log_op_error!(
            "diff_group",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            group_id = group_id
        );
        e
    })?;

    log_op_end!(
        "diff_group",
        duration_ms = start.elapsed().as_millis() as u64,
        group_id = group_id,
        identity = result.index_map.is_identity(),
        moves = result.moves.len() as u64,
        insertions = result.insertions.len() as u64,
        deletions = result.deletions.len() as u64
    );

    Ok(result)
}

fn diff_group_impl(
    head: &dyn BucketAccessor,
    prev: &dyn BucketAccessor,
    descriptor: &dyn GroupDescriptor,
    group_id: &str,
    config: &DiffConfig,
    differ: &dyn ScalarSequenceDiffer,
) -> Result<ReconciledGroupDiff> {
    let context = DiffContext::new(head, prev, config);
    let grouped = GroupedDiffContext::new(&context, descriptor, group_id)?;
    GroupedDiffResult::compute(&grouped, differ)
        .with_max_records(config.max_group_records)
        .reconcile()
}

/// Reconcile every group the descriptor declares, in group id order.
///
/// Either every group reconciles or the first failure is returned. Groups
/// are not logged individually; a failure is logged once, under
/// `diff_bucket`, with the failing group id.
///
/// # Errors
///
/// See [`diff_group`].
pub fn diff_bucket(
    head: &dyn BucketAccessor,
    prev: &dyn BucketAccessor,
    descriptor: &dyn GroupDescriptor,
    config: &DiffConfig,
) -> Result<BucketDiffReport> {
    let mut group_ids = descriptor.group_ids();
    group_ids.sort();

    log_op_start!("diff_bucket", groups = group_ids.len() as u64);
    let start = std::time::Instant::now();

    let mut groups = BTreeMap::new();
    for group_id in group_ids {
        let diff = diff_group_impl(
            head,
            prev,
            descriptor,
            &group_id,
            config,
            &StrictSequenceDiffer,
        )
        .map_err(|e| {
            log_op_error!(
                "diff_bucket",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                group_id = group_id.as_str()
            );
            e
        })?;
        groups.insert(group_id, diff);
    }

    let report = BucketDiffReport { groups };
    log_op_end!(
        "diff_bucket",
        duration_ms = start.elapsed().as_millis() as u64,
        changed = report.has_changes()
    );
    Ok(report)
}
