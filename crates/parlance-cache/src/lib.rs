//! Canonical entity state for Parlance.
//!
//! A gateway connection streams entity deltas at the cache; everything
//! else in the process wants to read entity state without re-fetching and
//! without ever seeing a torn or half-applied value. This crate is that
//! middle layer: per-kind authoritative stores, references that repair
//! their staleness on access, and live membership sets.
//!
//! # Design Philosophy
//!
//! - **One writer, many readers.** The ingestion path is the only thing
//!   that mutates a [`CanonicalStore`]; reads are concurrent, lock-light,
//!   and hand out independent clones.
//! - **Absence is not an error.** Lookups return `Option`; the only
//!   `Result` in the crate is registry routing for a space that was never
//!   registered.
//! - **Two repair disciplines, kept apart.** [`StickyRef`] persists what
//!   it finds (single-valued, rarely-changing associations);
//!   [`TransientRef`] and [`PresenceMap`] re-derive on every read
//!   (changing collections). Unifying them would either pin collection
//!   entries past their departure or forfeit the amortization that makes
//!   single-valued lookups cheap.
//! - **Availability over freshness on lag.** A canonical lookup that
//!   misses keeps the last-known value; entries leave collections only on
//!   their own explicit signals.

mod error;
mod event;
mod presence;
mod refs;
mod registry;
mod space;
mod store;

pub use error::CacheError;
pub use event::SpaceEvent;
pub use presence::PresenceMap;
pub use refs::{StickyRef, TransientRef};
pub use registry::CacheRegistry;
pub use space::SpaceState;
pub use store::CanonicalStore;

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
