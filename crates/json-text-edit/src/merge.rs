//! Merge-vs-replace decision for a proposed value against the live target.

use crate::types::JsonKind;
use serde_json::Value;

/// How a proposed value is written into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Reconcile the proposed object's keys into the target object one by
    /// one, leaving untouched keys' text alone.
    Merge,
    /// Substitute the whole subtree at the path.
    Replace,
}

/// Merge only when both sides have named fields to reconcile: the target
/// exists and both target and proposed are objects. Every other pairing —
/// absent target, scalar or array on either side — replaces, the safe
/// default when structure differs.
pub fn decide(target: Option<&Value>, proposed: &Value) -> Strategy {
    match target {
        Some(target)
            if JsonKind::of(target) == JsonKind::Object
                && JsonKind::of(proposed) == JsonKind::Object =>
        {
            Strategy::Merge
        }
        _ => Strategy::Replace,
    }
}
