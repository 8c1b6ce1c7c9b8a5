//! Multi-space registry: routes scoped deltas to their space state.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use parlance_types::{SpaceId, SpaceProfile};

use crate::error::CacheError;
use crate::event::SpaceEvent;
use crate::space::SpaceState;
use crate::Result;

/// All spaces this process is tracking.
///
/// States are handed out as `Arc`s so callers can hold a space across
/// calls; the registry keeps the same instance alive until the space is
/// removed, including across reconnect replays.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    spaces: DashMap<SpaceId, Arc<SpaceState>>,
}

impl CacheRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            spaces: DashMap::new(),
        }
    }

    /// Register a space, or refresh its profile if it is already known.
    ///
    /// Idempotent because gateways replay their create signals on every
    /// reconnect; existing handles stay valid either way.
    pub fn create_space(&self, id: SpaceId, profile: SpaceProfile) -> Arc<SpaceState> {
        if let Some(existing) = self.spaces.get(&id) {
            let existing = Arc::clone(existing.value());
            existing.apply(SpaceEvent::ProfileUpdated { profile });
            return existing;
        }
        debug!(space = %id, "registering space");
        let state = Arc::new(SpaceState::new(id, profile));
        self.spaces.insert(id, Arc::clone(&state));
        state
    }

    /// Drop a space on its deletion signal.
    ///
    /// Handles already held keep working against the detached state;
    /// routing to the id ends here.
    pub fn remove_space(&self, id: &SpaceId) -> Option<Arc<SpaceState>> {
        let removed = self.spaces.remove(id).map(|(_, state)| state);
        if removed.is_some() {
            debug!(space = %id, "space removed");
        }
        removed
    }

    /// The live state for a space.
    pub fn space(&self, id: &SpaceId) -> Option<Arc<SpaceState>> {
        self.spaces.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Ids of all tracked spaces, in no particular order.
    pub fn spaces(&self) -> Vec<SpaceId> {
        self.spaces.iter().map(|entry| *entry.key()).collect()
    }

    /// Number of tracked spaces.
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    /// Check if no spaces are tracked.
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Route a delta to its space.
    pub fn apply(&self, space_id: SpaceId, event: SpaceEvent) -> Result<()> {
        let state = self
            .space(&space_id)
            .ok_or(CacheError::UnknownSpace(space_id))?;
        state.apply(event);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
