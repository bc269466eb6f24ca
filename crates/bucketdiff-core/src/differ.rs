//! Per-index scalar sequence comparison.

use serde_json::Value;

/// Compares two value sequences index by index.
///
/// The returned vector has length `max(head.len(), prev.len())`; entry `k`
/// is `true` when index `k` changed. Callers pass sequences already cut at
/// their delete marker, so indices past a deletion point never show up.
pub trait ScalarSequenceDiffer {
    fn diff(&self, head: &[Value], prev: &[Value]) -> Vec<bool>;
}

/// Structural equality per index. Nested arrays and objects are compared
/// as opaque wholes; an index present on one side only is a change.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictSequenceDiffer;

impl ScalarSequenceDiffer for StrictSequenceDiffer {
    fn diff(&self, head: &[Value], prev: &[Value]) -> Vec<bool> {
        let len = head.len().max(prev.len());
        (0..len).map(|k| head.get(k) != prev.get(k)).collect()
    }
}

impl<F> ScalarSequenceDiffer for F
where
    F: Fn(&[Value], &[Value]) -> Vec<bool>,
{
    fn diff(&self, head: &[Value], prev: &[Value]) -> Vec<bool> {
        self(head, prev)
    }
}
