//! Video Recommendations
//!
//! Search-term extraction for exercise video lookups, YouTube link parsing
//! and gallery selection.

#![warn(missing_docs)]

pub mod keywords;
pub mod youtube;
pub mod gallery;

pub use keywords::{
    KeywordExtractor, RegexKeywordExtractor, PassthroughExtractor, ProfileKeywordExtractor,
};
pub use youtube::{YouTubeLinks, THUMBNAIL_PLACEHOLDER};
pub use gallery::{VideoCard, build_gallery, dedupe_by_url, GALLERY_LIMIT};

/// Errors building the recommenders.
#[derive(Debug, thiserror::Error)]
pub enum VideoError {
    /// A vocabulary or link pattern failed to compile
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A vocabulary list was empty
    #[error("empty vocabulary: {0}")]
    EmptyVocabulary(&'static str),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, VideoError>;
