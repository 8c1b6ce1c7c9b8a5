//! Per-space state: profile, channels, members, and voice occupancy.
//!
//! One `SpaceState` holds the authoritative stores for a single gateway
//! scope. The ingestion side funnels every decoded delta through
//! [`apply`](SpaceState::apply), the single logical writer, while any
//! number of threads read concurrently through the accessors. Nothing
//! here blocks on I/O or suspends.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::{debug, warn};

use parlance_types::{
    Channel, ChannelId, Member, SpaceId, SpaceProfile, UserId, order,
};

use crate::event::SpaceEvent;
use crate::presence::PresenceMap;
use crate::refs::StickyRef;
use crate::store::CanonicalStore;

/// Authoritative state for one space.
#[derive(Debug)]
pub struct SpaceState {
    /// Space this state belongs to.
    id: SpaceId,
    /// Space-level metadata, replaced wholesale by profile events.
    profile: RwLock<SpaceProfile>,
    /// Live channels.
    channels: CanonicalStore<ChannelId, Channel>,
    /// Live memberships.
    members: CanonicalStore<UserId, Member>,
    /// Voice occupancy per channel. The maps are plain values mutated
    /// through this store's writer path like any other entity.
    voice: CanonicalStore<ChannelId, PresenceMap<UserId, Member>>,
}

impl SpaceState {
    /// Create an empty space.
    pub fn new(id: SpaceId, profile: SpaceProfile) -> Self {
        Self {
            id,
            profile: RwLock::new(profile),
            channels: CanonicalStore::new(),
            members: CanonicalStore::new(),
            voice: CanonicalStore::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The space ID.
    pub fn id(&self) -> SpaceId {
        self.id
    }

    /// Copy of the current profile.
    pub fn profile(&self) -> SpaceProfile {
        self.profile.read().clone()
    }

    /// The authoritative channel store.
    pub fn channels(&self) -> &CanonicalStore<ChannelId, Channel> {
        &self.channels
    }

    /// The authoritative member store.
    pub fn members(&self) -> &CanonicalStore<UserId, Member> {
        &self.members
    }

    /// Copy of a channel.
    pub fn channel(&self, id: ChannelId) -> Option<Channel> {
        self.channels.get(&id)
    }

    /// Copy of a membership.
    pub fn member(&self, id: UserId) -> Option<Member> {
        self.members.get(&id)
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// All channels in canonical (bucket, position, id) order.
    ///
    /// The result is reproducible for a given set of live channels no
    /// matter what order their events arrived in.
    pub fn sorted_channels(&self) -> Vec<Channel> {
        let mut channels = self.channels.values();
        order::sort(&mut channels);
        channels
    }

    /// One-shot read of a channel's owning category.
    pub fn parent_of(&self, channel: &Channel) -> Option<Channel> {
        channel.parent_id.and_then(|id| self.channels.get(&id))
    }

    /// Long-lived handle on a channel's owning category.
    ///
    /// Seeded with the category as currently known; callers keep the
    /// handle and resolve it against [`channels`](SpaceState::channels)
    /// whenever they next need the value. The association changes rarely,
    /// so pinning the last good value is the right discipline here.
    pub fn category_ref(&self, channel: &Channel) -> Option<StickyRef<ChannelId, Channel>> {
        channel.parent_id.map(|id| match self.channels.get(&id) {
            Some(category) => StickyRef::seeded(id, category),
            None => StickyRef::new(id),
        })
    }

    /// Long-lived handle on a channel itself.
    pub fn channel_ref(&self, id: ChannelId) -> StickyRef<ChannelId, Channel> {
        match self.channels.get(&id) {
            Some(channel) => StickyRef::seeded(id, channel),
            None => StickyRef::new(id),
        }
    }

    /// Long-lived handle on a membership.
    pub fn member_ref(&self, id: UserId) -> StickyRef<UserId, Member> {
        match self.members.get(&id) {
            Some(member) => StickyRef::seeded(id, member),
            None => StickyRef::new(id),
        }
    }

    /// Current occupants of a voice-like channel, reconciled per entry
    /// against the member store. Empty when nobody is connected (or the
    /// channel is unknown).
    pub fn occupants(&self, channel_id: ChannelId) -> BTreeMap<UserId, Member> {
        match self.voice.get(&channel_id) {
            Some(set) => set.resolve_all(&self.members),
            None => BTreeMap::new(),
        }
    }

    /// Point-in-time copy of a channel's occupancy set, unreconciled.
    pub fn presence(&self, channel_id: ChannelId) -> Option<PresenceMap<UserId, Member>> {
        self.voice.get(&channel_id)
    }

    // =========================================================================
    // Event application (single logical writer)
    // =========================================================================

    /// Apply one decoded delta.
    ///
    /// Deltas referencing entities this cache hasn't seen yet are applied
    /// as far as they can be and logged; ingestion lag is expected, and
    /// reads repair what they can.
    pub fn apply(&self, event: SpaceEvent) {
        debug!(space = %self.id, event = event.name(), "applying state delta");
        match event {
            SpaceEvent::ProfileUpdated { profile } => {
                *self.profile.write() = profile;
            }
            SpaceEvent::ChannelCreated { channel } | SpaceEvent::ChannelUpdated { channel } => {
                self.channels.upsert(channel.id, channel);
            }
            SpaceEvent::ChannelDeleted { id } => {
                if self.channels.remove(&id).is_none() {
                    warn!(space = %self.id, channel = %id, "delete for unknown channel");
                }
                // Occupancy dies with the channel.
                self.voice.remove(&id);
            }
            SpaceEvent::MemberJoined { member } | SpaceEvent::MemberUpdated { member } => {
                self.members.upsert(member.user_id, member);
            }
            SpaceEvent::MemberLeft { user_id } => {
                if self.members.remove(&user_id).is_none() {
                    warn!(space = %self.id, user = %user_id, "departure of unknown member");
                }
                // Voice occupancy is left alone: it empties on its own
                // disconnect signal, and reads tolerate the stale entry
                // until then.
            }
            SpaceEvent::VoiceJoined { channel_id, member } => {
                // A voice connect is also a first observation of the member.
                self.members.insert_if_absent(member.user_id, member.clone());
                self.voice
                    .update_or_default(channel_id, |set| set.join(member.user_id, member));
            }
            SpaceEvent::VoiceLeft { channel_id, user_id } => {
                let known = self.voice.update(&channel_id, |set| {
                    if set.leave(&user_id).is_none() {
                        warn!(space = %self.id, channel = %channel_id, user = %user_id,
                            "voice disconnect for absent occupant");
                    }
                });
                if !known {
                    warn!(space = %self.id, channel = %channel_id,
                        "voice disconnect for channel with no occupancy");
                }
            }
            SpaceEvent::VoiceMoved { from, to, user_id } => {
                let mut moved = None;
                self.voice.update(&from, |set| moved = set.leave(&user_id));
                // Prefer the value carried across; fall back to the
                // canonical membership when the source set lagged.
                match moved.or_else(|| self.members.get(&user_id)) {
                    Some(member) => {
                        self.voice
                            .update_or_default(to, |set| set.join(user_id, member));
                    }
                    None => {
                        warn!(space = %self.id, user = %user_id,
                            "voice move for member never observed");
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
