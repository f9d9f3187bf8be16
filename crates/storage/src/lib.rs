//! Local cache abstraction and implementations for RehabFit.
//!
//! This crate provides a trait-based key/value cache with a JSON file
//! implementation, the key selection policy for per-user data, and typed
//! stores for chat history, recommended videos and the session token.

#![warn(missing_docs)]

pub mod trait_;
pub mod key;
pub mod json_storage;
pub mod memory;
pub mod stores;

pub use trait_::{LocalCache, CacheError, Result, load_json, save_json};
pub use key::{CacheScope, GUEST, TOKEN_KEY};
pub use json_storage::JsonFileCache;
pub use memory::MemoryCache;
pub use stores::{ChatHistoryStore, VideoListStore, SessionStore};
