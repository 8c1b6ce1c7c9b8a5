//! Stale-reference repair: identifier-plus-snapshot holders that reconcile
//! against a [`CanonicalStore`] on access.
//!
//! An object that remembers a related entity only by id goes stale the
//! moment the gateway replaces that entity. The two holders here repair
//! that on access, with deliberately different lifecycles:
//!
//! - [`StickyRef`] keeps what it finds. Each successful store lookup
//!   overwrites the held snapshot, so repeated reads of a rarely-changing
//!   single-valued association (a channel's owning category, say) amortize
//!   to one cheap map hit and pin the last good value if the target is
//!   later deleted.
//! - [`TransientRef`] keeps nothing. Every call re-derives from the store
//!   and falls back to the construction-time snapshot, so a value that
//!   later leaves the store is never silently pinned. This is the per-item
//!   discipline collection views use (see [`PresenceMap`](crate::PresenceMap)).
//!
//! The two must stay distinct: collapsing them into one auto-refresh
//! behavior either pins collection entries forever or throws away the
//! amortization that makes single-valued lookups cheap.
//!
//! Neither holder takes a lock. Sticky repair mutates through `&mut self`,
//! and both only ever read the store, so they are as thread-safe as the
//! store they are pointed at.

use std::hash::Hash;

use crate::store::CanonicalStore;

/// Reference that repairs itself once and remembers the result.
#[derive(Clone, Debug)]
pub struct StickyRef<K, V> {
    id: K,
    cached: Option<V>,
}

impl<K, V> StickyRef<K, V>
where
    K: Eq + Hash + Copy,
    V: Clone,
{
    /// Reference an id with no snapshot yet.
    ///
    /// Until a resolve finds the entity in the store, [`resolve`] returns
    /// `None`. That is the one absence a caller of a single-valued
    /// association must handle: the target was deleted before it was ever
    /// seen here.
    ///
    /// [`resolve`]: StickyRef::resolve
    pub fn new(id: K) -> Self {
        Self { id, cached: None }
    }

    /// Reference an id, seeded with the value known at construction time.
    pub fn seeded(id: K, snapshot: V) -> Self {
        Self {
            id,
            cached: Some(snapshot),
        }
    }

    /// The referenced identifier.
    pub fn id(&self) -> K {
        self.id
    }

    /// The held snapshot, without consulting the store.
    pub fn peek(&self) -> Option<&V> {
        self.cached.as_ref()
    }

    /// Reconcile against the store and return the best value available.
    ///
    /// A store hit overwrites the held snapshot; a miss leaves it in
    /// place, so a target deleted after a successful resolve keeps
    /// reading as its last live value. Freshness on the miss path is
    /// best-effort by design. Never fails, never blocks.
    pub fn resolve(&mut self, store: &CanonicalStore<K, V>) -> Option<&V> {
        if let Some(live) = store.get(&self.id) {
            self.cached = Some(live);
        }
        self.cached.as_ref()
    }
}

/// Reference that re-derives from the store on every access.
#[derive(Clone, Debug)]
pub struct TransientRef<K, V> {
    id: K,
    fallback: Option<V>,
}

impl<K, V> TransientRef<K, V>
where
    K: Eq + Hash + Copy,
    V: Clone,
{
    /// Reference an id with no fallback.
    pub fn new(id: K) -> Self {
        Self { id, fallback: None }
    }

    /// Reference an id with a fixed construction-time fallback.
    pub fn seeded(id: K, snapshot: V) -> Self {
        Self {
            id,
            fallback: Some(snapshot),
        }
    }

    /// The referenced identifier.
    pub fn id(&self) -> K {
        self.id
    }

    /// Fresh store read, falling back to the construction-time snapshot.
    ///
    /// Nothing is persisted: two calls around a store write observe the
    /// write, and two calls around a removal fall back identically.
    pub fn resolve(&self, store: &CanonicalStore<K, V>) -> Option<V> {
        store.get(&self.id).or_else(|| self.fallback.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
