//! Error types for cache operations.

use thiserror::Error;

use parlance_types::SpaceId;

/// Errors that can occur when routing state into the cache.
///
/// Lookups and reconciliation never error; absence is `Option` there.
/// The registry's routing surface is the one place a caller can hand us
/// something genuinely unroutable.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Event scoped to a space the registry has never seen.
    #[error("unknown space: {0}")]
    UnknownSpace(SpaceId),
}
