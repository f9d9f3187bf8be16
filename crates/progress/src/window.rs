//! Time-window selection for views.
//!
//! A window is a suffix of the chronologically ordered list (the last N
//! entries), not a calendar filter. Sparse logging means "last 30" can span
//! well over 30 days.

use serde::{Deserialize, Serialize};

/// Window selector offered by the progress views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    /// Last 7 entries
    Last7,
    /// Last 14 entries
    Last14,
    /// Last 30 entries
    #[default]
    Last30,
    /// Everything
    All,
}

impl TimeWindow {
    /// Maximum number of entries, `None` for all.
    pub fn limit(&self) -> Option<usize> {
        match self {
            TimeWindow::Last7 => Some(7),
            TimeWindow::Last14 => Some(14),
            TimeWindow::Last30 => Some(30),
            TimeWindow::All => None,
        }
    }

    /// Suffix slice of `items` covered by this window.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.limit() {
            Some(n) => &items[items.len().saturating_sub(n)..],
            None => items,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Last7 => "Last 7 days",
            TimeWindow::Last14 => "Last 14 days",
            TimeWindow::Last30 => "Last 30 days",
            TimeWindow::All => "All time",
        }
    }
}

/// Unknown window selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time window {0:?} (expected 7, 14, 30 or all)")]
pub struct ParseWindowError(pub String);

impl std::str::FromStr for TimeWindow {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7" => Ok(TimeWindow::Last7),
            "14" => Ok(TimeWindow::Last14),
            "30" => Ok(TimeWindow::Last30),
            "all" => Ok(TimeWindow::All),
            other => Err(ParseWindowError(other.to_string())),
        }
    }
}
