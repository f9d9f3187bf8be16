//! Typed stores over a [`LocalCache`].
//!
//! Each store follows the same lifecycle: load once when a view opens (a
//! missing key loads as empty) and write back on every change. Unreadable
//! cached data is logged and treated as empty rather than failing the view.

use std::sync::Arc;
use rehabfit_core::{ChatMessage, Video};
use serde::de::DeserializeOwned;
use tracing::warn;
use super::key::{CacheScope, TOKEN_KEY};
use super::{load_json, save_json, LocalCache, Result};

async fn load_or_empty<T, C>(cache: &C, key: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    C: LocalCache + ?Sized,
{
    match load_json(cache, key).await {
        Ok(Some(items)) => Ok(items),
        Ok(None) => Ok(Vec::new()),
        Err(super::CacheError::Json(e)) => {
            warn!(key, error = %e, "discarding unreadable cache entry");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Chat history for one scope.
pub struct ChatHistoryStore<C: LocalCache + ?Sized> {
    cache: Arc<C>,
    key: String,
}

impl<C: LocalCache + ?Sized> ChatHistoryStore<C> {
    /// Store for `scope`.
    pub fn new(cache: Arc<C>, scope: &CacheScope) -> Self {
        Self { cache, key: scope.chat_history_key() }
    }

    /// Cache key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Saved messages, oldest first.
    pub async fn load(&self) -> Result<Vec<ChatMessage>> {
        load_or_empty(self.cache.as_ref(), &self.key).await
    }

    /// Replace the saved history.
    pub async fn save(&self, messages: &[ChatMessage]) -> Result<()> {
        save_json(self.cache.as_ref(), &self.key, messages).await
    }

    /// Forget the history.
    pub async fn clear(&self) -> Result<()> {
        self.cache.remove(&self.key).await
    }
}

/// Recommended video list for one scope.
pub struct VideoListStore<C: LocalCache + ?Sized> {
    cache: Arc<C>,
    key: String,
}

impl<C: LocalCache + ?Sized> VideoListStore<C> {
    /// Store for `scope`.
    pub fn new(cache: Arc<C>, scope: &CacheScope) -> Self {
        Self { cache, key: scope.videos_key() }
    }

    /// Cached videos.
    pub async fn load(&self) -> Result<Vec<Video>> {
        load_or_empty(self.cache.as_ref(), &self.key).await
    }

    /// Replace the cached list.
    pub async fn save(&self, videos: &[Video]) -> Result<()> {
        save_json(self.cache.as_ref(), &self.key, videos).await
    }
}

/// Session token storage.
pub struct SessionStore<C: LocalCache + ?Sized> {
    cache: Arc<C>,
}

impl<C: LocalCache + ?Sized> SessionStore<C> {
    /// Session store over `cache`.
    pub fn new(cache: Arc<C>) -> Self {
        Self { cache }
    }

    /// Current token, if logged in.
    pub async fn token(&self) -> Result<Option<String>> {
        Ok(self
            .cache
            .get(TOKEN_KEY)
            .await?
            .filter(|t| !t.trim().is_empty()))
    }

    /// Remember a token after login.
    pub async fn set_token(&self, token: &str) -> Result<()> {
        self.cache.put(TOKEN_KEY, token).await
    }

    /// Log out.
    pub async fn clear(&self) -> Result<()> {
        self.cache.remove(TOKEN_KEY).await
    }
}
