//! Decoded gateway deltas, the write surface of a space.
//!
//! The surrounding protocol layer owns wire parsing; by the time an event
//! reaches this crate it is a typed create/update/delete signal scoped to
//! one space. Applying one is always synchronous and in-memory; see
//! [`SpaceState::apply`](crate::space::SpaceState::apply).

use serde::{Deserialize, Serialize};

use parlance_types::{Channel, ChannelId, Member, SpaceProfile, UserId};

/// A decoded state delta for one space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpaceEvent {
    /// Space metadata replaced wholesale.
    ProfileUpdated { profile: SpaceProfile },
    /// A channel appeared.
    ChannelCreated { channel: Channel },
    /// A channel changed; the payload is the full replacement record.
    ChannelUpdated { channel: Channel },
    /// A channel was deleted.
    ChannelDeleted { id: ChannelId },
    /// An account joined the space.
    MemberJoined { member: Member },
    /// A membership changed; full replacement record.
    MemberUpdated { member: Member },
    /// An account left the space.
    MemberLeft { user_id: UserId },
    /// A member connected to a voice-like channel.
    VoiceJoined { channel_id: ChannelId, member: Member },
    /// A member disconnected from a voice-like channel.
    VoiceLeft { channel_id: ChannelId, user_id: UserId },
    /// A member hopped between voice-like channels.
    VoiceMoved {
        from: ChannelId,
        to: ChannelId,
        user_id: UserId,
    },
}

impl SpaceEvent {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            SpaceEvent::ProfileUpdated { .. } => "profile_updated",
            SpaceEvent::ChannelCreated { .. } => "channel_created",
            SpaceEvent::ChannelUpdated { .. } => "channel_updated",
            SpaceEvent::ChannelDeleted { .. } => "channel_deleted",
            SpaceEvent::MemberJoined { .. } => "member_joined",
            SpaceEvent::MemberUpdated { .. } => "member_updated",
            SpaceEvent::MemberLeft { .. } => "member_left",
            SpaceEvent::VoiceJoined { .. } => "voice_joined",
            SpaceEvent::VoiceLeft { .. } => "voice_left",
            SpaceEvent::VoiceMoved { .. } => "voice_moved",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
