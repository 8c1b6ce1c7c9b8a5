//! Canonical entity store: the single authoritative map per entity kind.
//!
//! One store exists per (space, entity kind) pair and holds the only live
//! instance of each entity. The gateway ingestion path is the sole writer;
//! everything else reads. Reads hand out clones, so a value returned from
//! [`CanonicalStore::get`] is a frozen snapshot that later writes cannot
//! touch. Staleness is repaired by re-reading, never by mutation through
//! a previously returned copy.
//!
//! The backing map is sharded: writes to the same id serialize on the
//! shard entry, writes to different ids proceed independently, and readers
//! never block each other. Nothing here blocks on I/O or fails; absence
//! is `None`, not an error.

use std::fmt;
use std::hash::Hash;

use dashmap::DashMap;

/// Authoritative map from identifier to the live entity instance.
pub struct CanonicalStore<K, V> {
    entries: DashMap<K, V>,
}

impl<K, V> fmt::Debug for CanonicalStore<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanonicalStore")
            .field("entries", &self.entries)
            .finish()
    }
}

impl<K, V> Default for CanonicalStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<K, V> CanonicalStore<K, V>
where
    K: Eq + Hash + Copy,
    V: Clone,
{
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Clone of the live value, if one exists.
    ///
    /// The returned copy is independent: later writes replace the live
    /// instance but never reach into copies already handed out.
    pub fn get(&self, id: &K) -> Option<V> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    /// Insert or replace the live value. Last writer wins per id.
    ///
    /// Returns the displaced value, if any.
    pub fn upsert(&self, id: K, value: V) -> Option<V> {
        self.entries.insert(id, value)
    }

    /// Merge a partial delta into the live value in place.
    ///
    /// Returns false (without running the closure) when the id has never
    /// been observed.
    pub fn update(&self, id: &K, apply: impl FnOnce(&mut V)) -> bool {
        match self.entries.get_mut(id) {
            Some(mut entry) => {
                apply(entry.value_mut());
                true
            }
            None => false,
        }
    }

    /// Insert a fresh default value if the id is unseen, then merge.
    pub fn update_or_default(&self, id: K, apply: impl FnOnce(&mut V))
    where
        V: Default,
    {
        apply(self.entries.entry(id).or_default().value_mut());
    }

    /// Record the first observation of an entity without disturbing a
    /// live value that later deltas may already have refined.
    pub fn insert_if_absent(&self, id: K, value: V) {
        self.entries.entry(id).or_insert(value);
    }

    /// Drop the live value on an explicit deletion signal.
    pub fn remove(&self, id: &K) -> Option<V> {
        self.entries.remove(id).map(|(_, value)| value)
    }

    /// Check whether a live value exists.
    pub fn contains(&self, id: &K) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store has no live entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers of all live entries, in no particular order.
    pub fn ids(&self) -> Vec<K> {
        self.entries.iter().map(|entry| *entry.key()).collect()
    }

    /// Clones of all live values, in no particular order.
    ///
    /// Callers wanting a reproducible order sort the result themselves.
    pub fn values(&self) -> Vec<V> {
        self.entries.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Drop every entry. Used when a whole scope is torn down.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
