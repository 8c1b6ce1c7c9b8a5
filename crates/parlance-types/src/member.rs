//! Users, members, and the space profile.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::now_millis;

/// A platform account, independent of any space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Account name.
    pub username: String,
    /// Whether the account is automated.
    pub bot: bool,
}

impl User {
    /// Create a non-bot user.
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            bot: false,
        }
    }

    /// Mark the account as automated.
    pub fn as_bot(mut self) -> Self {
        self.bot = true;
        self
    }
}

/// A user's standing within one space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The account this membership belongs to.
    pub user_id: UserId,
    /// Account name at last observation.
    pub username: String,
    /// Space-local display override.
    pub nickname: Option<String>,
    /// Join time, Unix millis.
    pub joined_at: u64,
}

impl Member {
    /// Create a membership joined now.
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            nickname: None,
            joined_at: now_millis(),
        }
    }

    /// Set the space-local nickname.
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// The name clients should render: nickname when set, else username.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.username)
    }
}

/// Mutable space-level metadata, replaced wholesale by profile updates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceProfile {
    /// Space display name.
    pub name: String,
    /// Owning account.
    pub owner: UserId,
}

impl SpaceProfile {
    /// Create a profile.
    pub fn new(name: impl Into<String>, owner: UserId) -> Self {
        Self {
            name: name.into(),
            owner,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
