//! Typed identifiers for spaces, channels, and users.
//!
//! All ID types wrap a 64-bit unsigned snowflake assigned by the gateway.
//! They're opaque (nothing in this workspace mints them or looks inside)
//! and they order by plain unsigned comparison, which makes them the final,
//! always-discriminating tie-break wherever entities are sorted.
//!
//! Each entity kind gets its own newtype so a `ChannelId` can't be handed
//! to a member lookup by accident. The raw value is reachable via `get()`
//! for the rare cross-kind comparison (sort tie-breaks, logging).

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A space identifier (scope container).
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceId(u64);

/// A channel identifier.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(u64);

/// A user identifier.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

/// Error from parsing an ID out of decimal text.
#[derive(Debug, thiserror::Error)]
#[error("invalid snowflake '{input}': {source}")]
pub struct ParseIdError {
    /// The text that failed to parse.
    pub input: String,
    source: ParseIntError,
}

// ── Shared behavior ─────────────────────────────────────────────────────────

macro_rules! impl_snowflake_id {
    ($T:ident, $name:literal) => {
        impl $T {
            /// Wrap a raw snowflake value.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// The raw 64-bit value.
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $T {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$T> for u64 {
            fn from(id: $T) -> u64 {
                id.0
            }
        }

        impl FromStr for $T {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u64>().map(Self).map_err(|source| ParseIdError {
                    input: s.to_string(),
                    source,
                })
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // Bare decimal, same as the wire representation
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $name, self.0)
            }
        }
    };
}

impl_snowflake_id!(SpaceId, "SpaceId");
impl_snowflake_id!(ChannelId, "ChannelId");
impl_snowflake_id!(UserId, "UserId");

// ============================================================================
// Tests
// ============================================================================
