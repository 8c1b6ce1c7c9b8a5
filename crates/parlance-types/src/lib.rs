//! Shared identity and entity types for Parlance.
//!
//! This crate is the relational foundation: typed IDs, channel and member
//! records, and the deterministic ordering comparator. It depends on no
//! other parlance crate, so everything else can build on it.
//!
//! # Entity-Relationship Overview
//!
//! ```text
//! Space (SpaceId) ← one gateway scope
//!     └── described by SpaceProfile (name + owner)
//!     └── contains Channel (ChannelId, kind → sort bucket)
//!     └── contains Member (UserId within this space)
//!
//! Channel (ChannelId)
//!     └── parent_id files it under a Category channel
//!     └── position + id decide its place in sorted views
//!
//! Member (UserId)
//!     └── space-local view of a User account
//! ```
//!
//! # Key Types
//!
//! |------------------|-----------------------------------------------|
//! | Type             | Purpose                                       |
//! |------------------|-----------------------------------------------|
//! | [`SpaceId`]      | Which scope                                   |
//! | [`ChannelId`]    | Which channel                                 |
//! | [`UserId`]       | Which account                                 |
//! | [`Channel`]      | Channel record (kind, position, parent)       |
//! | [`ChannelKind`]  | Taxonomy, decides the [`SortBucket`]          |
//! | [`Member`]       | Space-local membership record                 |
//! | [`User`]         | Platform account                              |
//! | [`SpaceProfile`] | Space-level metadata                          |
//! | [`Orderable`]    | Capability feeding the (bucket, position, id) |
//! |                  | comparator                                    |
//! |------------------|-----------------------------------------------|

pub mod channel;
pub mod ids;
pub mod member;
pub mod order;

// Re-export primary types at crate root for convenience.
pub use channel::{Channel, ChannelKind};
pub use ids::{ChannelId, ParseIdError, SpaceId, UserId};
pub use member::{Member, SpaceProfile, User};
pub use order::{Orderable, SortBucket, compare, sort};

/// Current time as Unix milliseconds. Used by constructors throughout the crate.
pub(crate) fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
