//! Live membership sets with per-read reconciliation.
//!
//! A [`PresenceMap`] tracks who is currently in a container, typically
//! the members connected to a voice channel. Entries come and go **only**
//! through explicit join/leave signals; reads reconcile every entry
//! against the canonical member store without writing anything back.
//!
//! A failed canonical lookup during a read is evidence of ingestion lag,
//! not proof of absence, so [`resolve_all`](PresenceMap::resolve_all)
//! keeps the stale entry rather than dropping it. Callers here prefer
//! showing last-known data over strict freshness; the entry disappears
//! when (and only when) its leave signal arrives. This is a deliberate
//! trade-off, not an oversight.
//!
//! The map itself is plain data with no interior locks, so it can live as
//! a value inside a [`CanonicalStore`] and be mutated through the store's
//! single-writer path like any other entity. Reads hand out independent
//! copies, so iterating a result can never race a concurrent write.

use std::collections::BTreeMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::store::CanonicalStore;

/// Identifier-keyed live set, ordered by id for reproducible iteration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresenceMap<K: Ord, V> {
    entries: BTreeMap<K, V>,
}

// Manual impl: the derive would demand K: Default and V: Default, and an
// empty set needs neither.
impl<K: Ord, V> Default for PresenceMap<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K, V> PresenceMap<K, V>
where
    K: Ord + Eq + Hash + Copy,
    V: Clone,
{
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Record an arrival, replacing any previous entry for the id.
    pub fn join(&mut self, id: K, value: V) {
        self.entries.insert(id, value);
    }

    /// Record a departure. The only way an entry ever leaves the set.
    pub fn leave(&mut self, id: &K) -> Option<V> {
        self.entries.remove(id)
    }

    /// The entry as last recorded, without reconciliation.
    pub fn get(&self, id: &K) -> Option<&V> {
        self.entries.get(id)
    }

    /// Check membership.
    pub fn contains(&self, id: &K) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers currently in the set, in id order.
    pub fn ids(&self) -> Vec<K> {
        self.entries.keys().copied().collect()
    }

    /// Reconcile every entry against the store and return the result.
    ///
    /// Entries found in the store come back canonical; entries the store
    /// doesn't know keep their last recorded value. Nothing is persisted:
    /// the set itself is untouched, and the next call re-derives from
    /// scratch. Entries are never dropped here; only
    /// [`leave`](PresenceMap::leave) removes.
    pub fn resolve_all(&self, store: &CanonicalStore<K, V>) -> BTreeMap<K, V> {
        self.entries
            .iter()
            .map(|(id, last_known)| {
                (*id, store.get(id).unwrap_or_else(|| last_known.clone()))
            })
            .collect()
    }

    /// Independent point-in-time copy of the recorded values, in id order.
    ///
    /// Later joins and leaves are not observable through a copy already
    /// returned.
    pub fn snapshot(&self) -> Vec<V> {
        self.entries.values().cloned().collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
