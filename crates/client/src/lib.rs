//! RehabFit backend client.
//!
//! HTTP access to the RehabFit API, configuration loading, the assistant chat
//! session and the dashboard view loader.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod api;
pub mod chat;
pub mod dashboard;

pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, Result};
pub use api::ApiClient;
pub use chat::{ChatOutcome, ChatSession};
pub use dashboard::DashboardView;
