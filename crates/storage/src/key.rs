//! Cache key selection policy.
//!
//! Per-user data is keyed by the authenticated user id; without one, a shared
//! guest sentinel is used. The policy lives here so callers never build keys
//! by hand.

use serde::{Deserialize, Serialize};

/// Sentinel scope name for unauthenticated sessions.
pub const GUEST: &str = "guest";

/// Key of the session token.
pub const TOKEN_KEY: &str = "token";

const CHAT_HISTORY_PREFIX: &str = "rehabfit-chat-history";
const VIDEOS_PREFIX: &str = "rehabfit-recommended-videos";

/// Whose data a cache entry belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheScope {
    /// Authenticated user, by backend id
    User(String),
    /// No authenticated user
    Guest,
}

impl CacheScope {
    /// Scope for an optional user id; a missing or blank id selects the guest
    /// scope.
    pub fn for_user(user_id: Option<&str>) -> Self {
        match user_id.map(str::trim) {
            Some(id) if !id.is_empty() => CacheScope::User(id.to_string()),
            _ => CacheScope::Guest,
        }
    }

    /// Suffix used in keys: the user id or `guest`.
    pub fn suffix(&self) -> &str {
        match self {
            CacheScope::User(id) => id,
            CacheScope::Guest => GUEST,
        }
    }

    /// Key of the chat history for this scope.
    pub fn chat_history_key(&self) -> String {
        format!("{}-{}", CHAT_HISTORY_PREFIX, self.suffix())
    }

    /// Key of the cached video list for this scope.
    pub fn videos_key(&self) -> String {
        format!("{}-{}", VIDEOS_PREFIX, self.suffix())
    }
}
