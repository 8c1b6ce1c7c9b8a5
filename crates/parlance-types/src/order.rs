//! Deterministic ordering across entities that share one identifier space.
//!
//! Sorted channel lists must come out identical on every process observing
//! the same state, no matter what order the gateway delivered updates in.
//! That rules out hash order, insertion order, and anything else
//! incidental. The comparator here is a pure (bucket, position, id) tuple
//! order: identifiers are unique, so the final tie-break always
//! discriminates and two distinct entities never compare equal.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Coarse sort category, the primary key of the comparator.
///
/// Lower buckets sort first. Categories come after the channels they
/// contain because grouping by parent happens above this comparator, not
/// inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBucket {
    /// Text-like channels.
    Text = 0,
    /// Voice-like channels.
    Voice = 1,
    /// Grouping categories.
    Category = 2,
}

/// Capability for entities that participate in deterministic sorting.
///
/// `position` is an explicit optional accessor: an entity either carries a
/// defined position or it doesn't, and the comparator treats a missing
/// position as "fall through to the id tie-break". There is no
/// partially-positioned state to go wrong at a call site.
pub trait Orderable {
    /// Sort category, the primary key.
    fn sort_bucket(&self) -> SortBucket;

    /// Positional rank within a bucket, if this entity has one.
    fn position(&self) -> Option<i32>;

    /// Raw identifier value, the final tie-break.
    fn raw_id(&self) -> u64;
}

/// Compare two entities by (bucket, position, id).
///
/// Strict total order: antisymmetric, transitive, and `Equal` only when
/// both sides carry the same identifier. Positions only participate when
/// both sides define one.
pub fn compare<T: Orderable + ?Sized>(a: &T, b: &T) -> Ordering {
    match a.sort_bucket().cmp(&b.sort_bucket()) {
        Ordering::Equal => {}
        unequal => return unequal,
    }

    if let (Some(ap), Some(bp)) = (a.position(), b.position())
        && ap != bp
    {
        return ap.cmp(&bp);
    }

    a.raw_id().cmp(&b.raw_id())
}

/// Sort a slice into canonical order.
pub fn sort<T: Orderable>(items: &mut [T]) {
    // Unstable is fine: compare() never returns Equal for distinct ids.
    items.sort_unstable_by(|a, b| compare(a, b));
}

// ============================================================================
// Tests
// ============================================================================
