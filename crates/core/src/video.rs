//! Recommended exercise video.

use serde::{Deserialize, Serialize};

/// A recommended video link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Video {
    /// Video title
    pub title: String,

    /// Watch URL
    pub url: String,
}

impl Video {
    /// Create a video link.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into() }
    }
}
