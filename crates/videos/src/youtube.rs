//! YouTube link parsing.

use regex::Regex;
use crate::Result;

/// Thumbnail shown when a link has no recognisable video id.
pub const THUMBNAIL_PLACEHOLDER: &str = "https://via.placeholder.com/320x180?text=No+Thumbnail";

const VIDEO_ID_PATTERN: &str = r"(?:v=|/embed/|\.be/)([a-zA-Z0-9_-]{11})";

/// Extracts video ids from watch, embed and short links.
#[derive(Debug, Clone)]
pub struct YouTubeLinks {
    video_id: Regex,
}

impl YouTubeLinks {
    /// Compile the link pattern.
    pub fn new() -> Result<Self> {
        Ok(Self { video_id: Regex::new(VIDEO_ID_PATTERN)? })
    }

    /// The 11-character video id in `url`, if any.
    pub fn video_id<'a>(&self, url: &'a str) -> Option<&'a str> {
        self.video_id
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// High-quality thumbnail for `url`, or the placeholder.
    pub fn thumbnail_url(&self, url: &str) -> String {
        match self.video_id(url) {
            Some(id) => format!("https://img.youtube.com/vi/{}/hqdefault.jpg", id),
            None => THUMBNAIL_PLACEHOLDER.to_string(),
        }
    }
}
