//! Local cache trait abstraction.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Error type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key cannot be stored by this backend
    #[error("Invalid cache key: {0:?}")]
    InvalidKey(String),
}

/// Client-side key/value cache, the local equivalent of browser storage.
///
/// Values are opaque strings; [`load_json`] and [`save_json`] layer typed
/// JSON access on top. A missing key is `Ok(None)`, never an error.
#[async_trait]
pub trait LocalCache: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;

    /// All stored keys, sorted.
    async fn keys(&self) -> Result<Vec<String>>;
}

/// Read and deserialize the JSON value under `key`.
pub async fn load_json<T, C>(cache: &C, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    C: LocalCache + ?Sized,
{
    match cache.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize `value` as JSON and store it under `key`.
pub async fn save_json<T, C>(cache: &C, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized + Sync,
    C: LocalCache + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    cache.put(key, &raw).await
}
