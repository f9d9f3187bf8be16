//! Video gallery selection.

use std::collections::HashSet;
use rehabfit_core::Video;
use serde::Serialize;
use crate::youtube::YouTubeLinks;

/// Maximum cards shown in the gallery.
pub const GALLERY_LIMIT: usize = 9;

/// One gallery card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoCard {
    /// Video title
    pub title: String,

    /// Watch URL
    pub url: String,

    /// Thumbnail URL (placeholder when the id is unknown)
    pub thumbnail: String,
}

/// Drop repeated URLs, keeping the first occurrence.
pub fn dedupe_by_url(videos: &[Video]) -> Vec<Video> {
    let mut seen = HashSet::new();
    videos
        .iter()
        .filter(|v| seen.insert(v.url.as_str()))
        .cloned()
        .collect()
}

/// Cards for the first [`GALLERY_LIMIT`] distinct videos.
pub fn build_gallery(links: &YouTubeLinks, videos: &[Video]) -> Vec<VideoCard> {
    dedupe_by_url(videos)
        .into_iter()
        .take(GALLERY_LIMIT)
        .map(|v| VideoCard {
            thumbnail: links.thumbnail_url(&v.url),
            title: v.title,
            url: v.url,
        })
        .collect()
}
