//! RehabFit core data models.
//!
//! This crate defines the data structures shared by the metrics engine, the
//! local cache, the video recommender and the backend client.

#![warn(missing_docs)]

// Progress logging
mod entry;
mod stats;

// Account and dashboard
mod user;
mod dashboard;

// Assistant
mod chat;
mod video;

mod error;

// Re-exports
pub use entry::{ProgressEntry, ProgressForm, Mood, METRIC_MAX};
pub use stats::{DerivedStats, Trend, PainBucket, RecoveryStatus};
pub use user::{
    UserProfile, ProfileUpdate, Credentials, Registration, RegisterRequest, MIN_PASSWORD_LEN,
};
pub use dashboard::DashboardData;
pub use chat::{ChatMessage, ChatReply, Sender, CHAT_FALLBACK_REPLY};
pub use video::Video;
pub use error::{ValidationError, Result};

/// Calendar date type used throughout.
pub type Date = chrono::NaiveDate;
