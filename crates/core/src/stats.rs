//! Derived statistics types produced by the metrics engine.
//!
//! None of these are persisted; they are recomputed from the current entry
//! list whenever it changes.

use serde::{Deserialize, Serialize};

/// Direction of recovery over the recent window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Improving by more than the threshold
    Up,
    /// Declining by more than the threshold
    Down,
    /// Within the threshold, or not enough history
    #[default]
    Neutral,
}

impl Trend {
    /// Short label for display ("improving", "declining", "stable").
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Up => "improving",
            Trend::Down => "declining",
            Trend::Neutral => "stable",
        }
    }
}

/// Aggregate trend and streak statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    /// Recovery direction
    pub trend: Trend,

    /// Absolute percentage change between the recent and older windows
    pub improvement_percent: f64,

    /// Consecutive non-decreasing steps ending at the latest entry
    pub streak: u32,
}

/// Pain level bucket used for the distribution chart.
///
/// The declaration order is the fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PainBucket {
    /// Pain 0-3
    Low,
    /// Pain 4-6
    Medium,
    /// Pain 7-10
    High,
}

impl PainBucket {
    /// All buckets in display order.
    pub const ALL: [PainBucket; 3] = [PainBucket::Low, PainBucket::Medium, PainBucket::High];

    /// Bucket for a pain level.
    pub fn for_pain(pain_level: u8) -> Self {
        match pain_level {
            0..=3 => PainBucket::Low,
            4..=6 => PainBucket::Medium,
            _ => PainBucket::High,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            PainBucket::Low => "Low (0-3)",
            PainBucket::Medium => "Medium (4-6)",
            PainBucket::High => "High (7-10)",
        }
    }

    /// Chart colour, fixed per bucket.
    pub fn color(&self) -> &'static str {
        match self {
            PainBucket::Low => "#10b981",
            PainBucket::Medium => "#f59e0b",
            PainBucket::High => "#ef4444",
        }
    }
}

/// Overall recovery status derived from the backend recovery percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoveryStatus {
    /// 80% and above
    Excellent,
    /// 60-79%
    Good,
    /// 40-59%
    Fair,
    /// Below 40%
    NeedsAttention,
}

impl RecoveryStatus {
    /// Status for a 0-100 recovery percentage.
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            p if p >= 80 => RecoveryStatus::Excellent,
            p if p >= 60 => RecoveryStatus::Good,
            p if p >= 40 => RecoveryStatus::Fair,
            _ => RecoveryStatus::NeedsAttention,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            RecoveryStatus::Excellent => "Excellent",
            RecoveryStatus::Good => "Good",
            RecoveryStatus::Fair => "Fair",
            RecoveryStatus::NeedsAttention => "Needs Attention",
        }
    }
}
