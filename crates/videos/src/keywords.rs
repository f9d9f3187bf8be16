//! Search-term extraction strategies.
//!
//! Callers depend on [`KeywordExtractor`] only, so the regex heuristic can be
//! replaced (by an NLP step or server-side extraction) without touching them.

use regex::Regex;
use rehabfit_core::UserProfile;
use tracing::debug;
use crate::{Result, VideoError};

/// Turns free text into video search terms.
pub trait KeywordExtractor: Send + Sync {
    /// Search terms for `text`, most relevant first, without duplicates.
    fn extract(&self, text: &str) -> Vec<String>;
}

/// Body parts and injury sites, as regex fragments.
const BODY_PARTS: &[&str] = &[
    "rotator cuff",
    "lower back",
    "upper back",
    "hamstrings?",
    "achilles",
    "acl",
    "knees?",
    "shoulders?",
    "back",
    "ankles?",
    "hips?",
    "neck",
    "wrists?",
    "elbows?",
    "spine",
    "calf",
    "calves",
    "quads?",
    "groin",
];

/// Exercise kinds, as regex fragments.
const EXERCISES: &[&str] = &[
    "stretch(?:ing|es)?",
    "strengthening",
    "mobility",
    "balance",
    "yoga",
    "pilates",
    "squats?",
    "lunges?",
    "bridges?",
    "planks?",
    "walking",
    "cycling",
    "swimming",
    "core",
    "physiotherapy",
];

/// Default cap on returned terms.
const DEFAULT_MAX_TERMS: usize = 5;

/// Heuristic extractor matching body-part and exercise vocabularies.
///
/// Body parts become `"<part> rehab exercise"`, exercise words become
/// `"<word> exercise"`. Terms are ordered by first appearance in the text.
pub struct RegexKeywordExtractor {
    body_parts: Regex,
    exercises: Regex,
    max_terms: usize,
}

impl RegexKeywordExtractor {
    /// Extractor with the built-in vocabularies.
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(BODY_PARTS, EXERCISES)
    }

    /// Extractor with custom vocabularies. Entries are regex fragments and
    /// are matched case-insensitively on word boundaries.
    pub fn with_vocabulary(body_parts: &[&str], exercises: &[&str]) -> Result<Self> {
        Ok(Self {
            body_parts: word_regex(body_parts, "body parts")?,
            exercises: word_regex(exercises, "exercises")?,
            max_terms: DEFAULT_MAX_TERMS,
        })
    }

    /// Cap the number of returned terms.
    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }
}

fn word_regex(fragments: &[&str], what: &'static str) -> Result<Regex> {
    if fragments.is_empty() {
        return Err(VideoError::EmptyVocabulary(what));
    }
    let pattern = format!(r"(?i)\b(?:{})\b", fragments.join("|"));
    Ok(Regex::new(&pattern)?)
}

impl KeywordExtractor for RegexKeywordExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        let mut hits: Vec<(usize, String)> = self
            .body_parts
            .find_iter(text)
            .map(|m| (m.start(), format!("{} rehab exercise", m.as_str().to_lowercase())))
            .chain(
                self.exercises
                    .find_iter(text)
                    .map(|m| (m.start(), format!("{} exercise", m.as_str().to_lowercase()))),
            )
            .collect();
        hits.sort_by_key(|(pos, _)| *pos);

        let mut terms: Vec<String> = Vec::new();
        for (_, term) in hits {
            if terms.len() == self.max_terms {
                break;
            }
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
        debug!(terms = ?terms, "extracted search terms");
        terms
    }
}

/// Uses the whole trimmed text as the only term, the way the backend treats
/// an assistant-suggested video title.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughExtractor;

impl KeywordExtractor for PassthroughExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() { Vec::new() } else { vec![text.to_string()] }
    }
}

/// Search queries derived from a user's profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileKeywordExtractor;

impl ProfileKeywordExtractor {
    /// `"<injury> rehab exercise"` and `"<goal> exercise"`, skipping blanks.
    pub fn queries(&self, profile: &UserProfile) -> Vec<String> {
        let injury = profile
            .injury_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("{} rehab exercise", s));
        let goal = profile
            .fitness_goal
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("{} exercise", s));
        injury.into_iter().chain(goal).collect()
    }
}
