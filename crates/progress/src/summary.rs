//! Overview figures and recovery insights.

use chrono::NaiveDate;
use rehabfit_core::{DerivedStats, ProgressEntry, RecoveryStatus, Trend};
use serde::Serialize;

use crate::engine::TREND_WINDOW;

/// Entries needed before the consistency insight is shown.
const CONSISTENCY_MIN_ENTRIES: usize = 7;

/// Latest pain at or below this counts as low.
const LOW_PAIN_MAX: u8 = 3;

/// Headline figures for the dashboard overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSummary {
    /// Number of logged entries
    pub total_entries: usize,

    /// Pain level of the most recent entry
    pub latest_pain: Option<u8>,

    /// Pain reduction from first to latest entry, percent
    pub pain_reduction_percent: u32,

    /// Backend recovery percentage
    pub recovery_percentage: u32,

    /// Status for the recovery percentage
    pub recovery_status: RecoveryStatus,

    /// Whole days since recovery tracking started
    pub days_in_recovery: i64,
}

impl OverviewSummary {
    /// Build the overview from history and backend figures.
    pub fn compute(
        entries: &[ProgressEntry],
        recovery_percentage: u32,
        recovery_start: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        Self {
            total_entries: entries.len(),
            latest_pain: entries.last().map(|e| e.pain_level),
            pain_reduction_percent: pain_reduction_percent(entries),
            recovery_percentage,
            recovery_status: RecoveryStatus::from_percentage(recovery_percentage),
            days_in_recovery: days_in_recovery(recovery_start, today),
        }
    }
}

/// Rounded percentage drop in pain from the first entry to the latest.
///
/// Never negative; zero when there is no history or the first entry had no
/// pain to reduce.
pub fn pain_reduction_percent(entries: &[ProgressEntry]) -> u32 {
    let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
        return 0;
    };
    if first.pain_level == 0 {
        return 0;
    }
    let reduction = (f64::from(first.pain_level) - f64::from(last.pain_level))
        / f64::from(first.pain_level)
        * 100.0;
    reduction.round().max(0.0) as u32
}

/// Whole days from `start` to `today`, zero without a start or for a start in
/// the future.
pub fn days_in_recovery(start: Option<NaiveDate>, today: NaiveDate) -> i64 {
    start
        .map(|s| (today - s).num_days().max(0))
        .unwrap_or(0)
}

/// Mobility and strength of one entry, for the weekly bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyBar {
    /// Entry date
    pub date: NaiveDate,

    /// Mobility, 0-10
    pub mobility: u8,

    /// Strength, 0-10
    pub strength: u8,
}

/// Bars for the most recent week of entries.
pub fn weekly_bars(entries: &[ProgressEntry]) -> Vec<WeeklyBar> {
    entries[entries.len().saturating_sub(TREND_WINDOW)..]
        .iter()
        .map(|e| WeeklyBar { date: e.date, mobility: e.mobility, strength: e.strength })
        .collect()
}

/// Human-readable insights derived from the history and its statistics.
///
/// The closing suggestion to ask the assistant is always present.
pub fn insights(entries: &[ProgressEntry], stats: &DerivedStats) -> Vec<String> {
    let mut lines = Vec::new();

    if stats.trend == Trend::Up {
        lines.push(format!(
            "Great progress! Your recovery trend is improving by {:.1}%",
            stats.improvement_percent
        ));
    }
    if stats.streak > 0 {
        lines.push(format!(
            "You're on a {}-day improvement streak - keep it up!",
            stats.streak
        ));
    }
    if entries.len() >= CONSISTENCY_MIN_ENTRIES {
        lines.push(format!(
            "You've logged {} entries - consistency is key to recovery",
            entries.len()
        ));
    }
    if entries.last().is_some_and(|e| e.pain_level <= LOW_PAIN_MAX) {
        lines.push("Low pain levels indicate good recovery progress".to_string());
    }
    lines.push(
        "Consider asking the AI Assistant for personalized recovery tips based on your progress"
            .to_string(),
    );

    lines
}

/// Time-of-day greeting for a 0-23 hour.
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        h if h < 12 => "Good morning",
        h if h < 18 => "Good afternoon",
        _ => "Good evening",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_stats;
    use chrono::Duration;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() + Duration::days(n)
    }

    fn with_pain(levels: &[u8]) -> Vec<ProgressEntry> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &p)| ProgressEntry::new(day(i as i64), p, 5, 5))
            .collect()
    }

    #[test]
    fn test_pain_reduction() {
        assert_eq!(pain_reduction_percent(&with_pain(&[8, 6, 2])), 75);
        assert_eq!(pain_reduction_percent(&with_pain(&[3, 6])), 0);
        assert_eq!(pain_reduction_percent(&with_pain(&[0, 0])), 0);
        assert_eq!(pain_reduction_percent(&[]), 0);
        assert_eq!(pain_reduction_percent(&with_pain(&[6, 5])), 17);
    }

    #[test]
    fn test_days_in_recovery() {
        assert_eq!(days_in_recovery(Some(day(0)), day(10)), 10);
        assert_eq!(days_in_recovery(Some(day(5)), day(0)), 0);
        assert_eq!(days_in_recovery(None, day(3)), 0);
    }

    #[test]
    fn test_overview() {
        let entries = with_pain(&[8, 4]);
        let summary = OverviewSummary::compute(&entries, 65, Some(day(0)), day(14));
        assert_eq!(summary.total_entries, 2);
        assert_eq!(summary.latest_pain, Some(4));
        assert_eq!(summary.pain_reduction_percent, 50);
        assert_eq!(summary.recovery_status, RecoveryStatus::Good);
        assert_eq!(summary.days_in_recovery, 14);
    }

    #[test]
    fn test_weekly_bars_take_last_seven() {
        let entries = with_pain(&[5; 10]);
        let bars = weekly_bars(&entries);
        assert_eq!(bars.len(), 7);
        assert_eq!(bars[0].date, day(3));
    }

    #[test]
    fn test_insights_for_empty_history() {
        let lines = insights(&[], &DerivedStats::default());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("AI Assistant"));
    }

    #[test]
    fn test_insights_for_steady_low_pain() {
        let entries = with_pain(&[2; 7]);
        let stats = compute_stats(&entries);
        let lines = insights(&entries, &stats);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("6-day improvement streak"));
        assert!(lines[1].contains("logged 7 entries"));
        assert!(lines[2].starts_with("Low pain"));
    }

    #[test]
    fn test_greeting() {
        assert_eq!(greeting(6), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(21), "Good evening");
    }
}
