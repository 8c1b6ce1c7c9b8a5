//! Channel records and their kind taxonomy.
//!
//! A channel is plain data: the cache layer owns the live instance and
//! everything else works with copies. `kind` decides the sort bucket;
//! `position` is the operator-assigned rank inside that bucket, absent for
//! kinds that aren't manually arranged.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::ids::ChannelId;
use crate::order::{Orderable, SortBucket};

/// What a channel is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ChannelKind {
    /// Grouping container for other channels.
    Category,
    /// Plain text conversation.
    Text,
    /// Broadcast text channel.
    #[strum(serialize = "announcement", serialize = "news")]
    Announcement,
    /// Real-time voice room.
    Voice,
    /// Moderated voice room with a speaker list.
    Stage,
}

impl ChannelKind {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Category => "category",
            ChannelKind::Text => "text",
            ChannelKind::Announcement => "announcement",
            ChannelKind::Voice => "voice",
            ChannelKind::Stage => "stage",
        }
    }

    /// Sort category for this kind.
    pub fn sort_bucket(&self) -> SortBucket {
        match self {
            ChannelKind::Text | ChannelKind::Announcement => SortBucket::Text,
            ChannelKind::Voice | ChannelKind::Stage => SortBucket::Voice,
            ChannelKind::Category => SortBucket::Category,
        }
    }

    /// Check if members can speak here.
    pub fn is_voice_like(&self) -> bool {
        matches!(self, ChannelKind::Voice | ChannelKind::Stage)
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A channel as last decoded from the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Unique channel identifier.
    pub id: ChannelId,
    /// Display name.
    pub name: String,
    /// Kind, which fixes the sort bucket.
    pub kind: ChannelKind,
    /// Rank within the bucket. Absent for kinds without manual ordering.
    pub position: Option<i32>,
    /// Owning category, if this channel is filed under one.
    pub parent_id: Option<ChannelId>,
    /// Topic line shown in clients.
    pub topic: Option<String>,
}

impl Channel {
    /// Create a channel with no position, parent, or topic.
    pub fn new(id: ChannelId, name: impl Into<String>, kind: ChannelKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            position: None,
            parent_id: None,
            topic: None,
        }
    }

    /// Set the position rank.
    pub fn with_position(mut self, position: i32) -> Self {
        self.position = Some(position);
        self
    }

    /// File this channel under a category.
    pub fn with_parent(mut self, parent_id: ChannelId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the topic line.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }
}

impl Orderable for Channel {
    fn sort_bucket(&self) -> SortBucket {
        self.kind.sort_bucket()
    }

    fn position(&self) -> Option<i32> {
        self.position
    }

    fn raw_id(&self) -> u64 {
        self.id.get()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::compare;
    use std::cmp::Ordering;

    #[test]
    fn test_kind_string_roundtrip() {
        assert_eq!(ChannelKind::from_str("voice"), Some(ChannelKind::Voice));
        assert_eq!(ChannelKind::from_str("VOICE"), Some(ChannelKind::Voice));
        assert_eq!(ChannelKind::from_str("news"), Some(ChannelKind::Announcement));
        assert_eq!(ChannelKind::from_str("bogus"), None);
        assert_eq!(ChannelKind::Stage.as_str(), "stage");
    }

    #[test]
    fn test_kind_buckets() {
        assert_eq!(ChannelKind::Text.sort_bucket(), SortBucket::Text);
        assert_eq!(ChannelKind::Announcement.sort_bucket(), SortBucket::Text);
        assert_eq!(ChannelKind::Voice.sort_bucket(), SortBucket::Voice);
        assert_eq!(ChannelKind::Stage.sort_bucket(), SortBucket::Voice);
        assert_eq!(ChannelKind::Category.sort_bucket(), SortBucket::Category);
    }

    #[test]
    fn test_builder_chain() {
        let ch = Channel::new(ChannelId::new(1), "general", ChannelKind::Text)
            .with_position(3)
            .with_parent(ChannelId::new(9))
            .with_topic("daily chatter");
        assert_eq!(ch.position, Some(3));
        assert_eq!(ch.parent_id, Some(ChannelId::new(9)));
        assert_eq!(ch.topic.as_deref(), Some("daily chatter"));
    }

    #[test]
    fn test_channels_compare_by_tuple_order() {
        let text = Channel::new(ChannelId::new(10), "a", ChannelKind::Text).with_position(0);
        let voice = Channel::new(ChannelId::new(1), "b", ChannelKind::Voice).with_position(0);
        assert_eq!(compare(&text, &voice), Ordering::Less);

        let peer = Channel::new(ChannelId::new(5), "c", ChannelKind::Text).with_position(0);
        // Position tie: the higher id sorts later.
        assert_eq!(compare(&text, &peer), Ordering::Greater);
    }

    #[test]
    fn test_serde_kind_is_lowercase() {
        let json = serde_json::to_string(&ChannelKind::Announcement).unwrap();
        assert_eq!(json, "\"announcement\"");
    }
}
