//! Progress report: everything the progress view renders, computed in one pass.

use rehabfit_core::{DerivedStats, ProgressEntry};
use serde::Serialize;
use tracing::debug;

use crate::distribution::{DistributionSlice, PainDistribution};
use crate::engine::{annotate, compute_stats, ChartPoint};
use crate::summary::{insights, weekly_bars, WeeklyBar};
use crate::window::TimeWindow;

/// Snapshot of derived progress figures for one entry list and window.
///
/// Stats, distribution and insights always cover the full history; only the
/// chart series honour the selected window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    /// Window applied to the chart series
    pub window: TimeWindow,

    /// Total entries in the history
    pub total_entries: usize,

    /// Pain level of the latest entry
    pub latest_pain: Option<u8>,

    /// Trend, improvement and streak
    pub stats: DerivedStats,

    /// Pain distribution, non-empty buckets in fixed order
    pub distribution: Vec<DistributionSlice>,

    /// Annotated entries inside the window
    pub chart: Vec<ChartPoint>,

    /// Mobility and strength for the last week
    pub weekly: Vec<WeeklyBar>,

    /// Insight lines
    pub insights: Vec<String>,
}

impl ProgressReport {
    /// Compute the report. Never fails; empty input gives neutral figures.
    pub fn compute(entries: &[ProgressEntry], window: TimeWindow) -> Self {
        let stats = compute_stats(entries);
        let chart = annotate(window.apply(entries));
        debug!(
            entries = entries.len(),
            charted = chart.len(),
            trend = ?stats.trend,
            streak = stats.streak,
            "computed progress report"
        );

        Self {
            window,
            total_entries: entries.len(),
            latest_pain: entries.last().map(|e| e.pain_level),
            stats,
            distribution: PainDistribution::from_entries(entries).non_empty_slices(),
            chart,
            weekly: weekly_bars(entries),
            insights: insights(entries, &stats),
        }
    }

    /// Entries inside the window, newest first, for the history table.
    pub fn table<'a>(entries: &'a [ProgressEntry], window: TimeWindow) -> impl Iterator<Item = &'a ProgressEntry> {
        window.apply(entries).iter().rev()
    }
}
