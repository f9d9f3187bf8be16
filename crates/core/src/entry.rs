//! Progress entry model - one recovery log for a given day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::error::{Result, ValidationError};

/// Upper bound of the 0-10 metric scales.
pub const METRIC_MAX: u8 = 10;

/// A single user-submitted recovery log.
///
/// Entries are immutable once accepted by the backend; the client only ever
/// holds read-only snapshots of a user's history, ordered oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    /// Day the entry was logged for
    pub date: NaiveDate,

    /// Pain level, 0 (none) to 10 (severe)
    pub pain_level: u8,

    /// Mobility, 0 (very limited) to 10 (full range)
    pub mobility: u8,

    /// Strength, 0 (very weak) to 10 (full strength)
    pub strength: u8,

    /// Overall mood
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,

    /// Sleep quality, 1 to 10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<u8>,

    /// Minutes of exercise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_minutes: Option<u32>,

    /// Free-text observations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ProgressEntry {
    /// Create an entry with only the required metrics.
    pub fn new(date: NaiveDate, pain_level: u8, mobility: u8, strength: u8) -> Self {
        Self {
            date,
            pain_level,
            mobility,
            strength,
            mood: None,
            sleep_quality: None,
            exercise_minutes: None,
            notes: None,
        }
    }
}

/// Overall mood reported with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Feeling great
    Excellent,
    /// Feeling well
    Good,
    /// Getting by
    Fair,
    /// Struggling
    Poor,
}

impl Mood {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Excellent => "excellent",
            Mood::Good => "good",
            Mood::Fair => "fair",
            Mood::Poor => "poor",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "excellent" => Ok(Mood::Excellent),
            "good" => Ok(Mood::Good),
            "fair" => Ok(Mood::Fair),
            "poor" => Ok(Mood::Poor),
            other => Err(ValidationError::InvalidMood(other.to_string())),
        }
    }
}

/// Raw, unvalidated input for a new progress entry.
///
/// Every field is kept as text, the way it arrives from a form or the command
/// line. [`ProgressForm::validate`] turns it into a [`ProgressEntry`].
#[derive(Debug, Clone, Default)]
pub struct ProgressForm {
    /// Pain level, required, 0-10
    pub pain: String,

    /// Mobility, required, 0-10
    pub mobility: String,

    /// Strength, required, 0-10
    pub strength: String,

    /// Mood name, optional
    pub mood: String,

    /// Sleep quality, optional, 1-10
    pub sleep_quality: String,

    /// Exercise minutes, optional
    pub exercise_minutes: String,

    /// Free-text notes, optional
    pub notes: String,
}

impl ProgressForm {
    /// Validate the form and build an entry dated `date`.
    pub fn validate(&self, date: NaiveDate) -> Result<ProgressEntry> {
        if self.pain.trim().is_empty()
            || self.mobility.trim().is_empty()
            || self.strength.trim().is_empty()
        {
            return Err(ValidationError::MissingRequiredMetrics);
        }

        let pain_level = parse_scale("pain", &self.pain, 0)?;
        let mobility = parse_scale("mobility", &self.mobility, 0)?;
        let strength = parse_scale("strength", &self.strength, 0)?;

        let mood = non_blank(&self.mood).map(str::parse::<Mood>).transpose()?;
        let sleep_quality = non_blank(&self.sleep_quality)
            .map(|s| parse_scale("sleep quality", s, 1))
            .transpose()?;
        let exercise_minutes = non_blank(&self.exercise_minutes)
            .map(|s| {
                s.parse::<u32>().map_err(|_| ValidationError::InvalidNumber {
                    field: "exercise minutes",
                    value: s.to_string(),
                })
            })
            .transpose()?;

        Ok(ProgressEntry {
            date,
            pain_level,
            mobility,
            strength,
            mood,
            sleep_quality,
            exercise_minutes,
            notes: non_blank(&self.notes).map(str::to_string),
        })
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_scale(field: &'static str, raw: &str, min: u8) -> Result<u8> {
    let raw = raw.trim();
    let value: i64 = raw.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;
    if value < i64::from(min) || value > i64::from(METRIC_MAX) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max: METRIC_MAX,
        });
    }
    Ok(value as u8)
}
