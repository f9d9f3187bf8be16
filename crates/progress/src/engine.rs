//! Progress metrics engine.
//!
//! Folds pain, mobility and strength into a single composite score per entry
//! and derives trend, improvement and streak from the two most recent
//! seven-entry windows. Every function here is pure and total: empty input
//! yields neutral defaults, never an error.

use rehabfit_core::{DerivedStats, PainBucket, ProgressEntry, Trend, Date, METRIC_MAX};
use serde::Serialize;

/// Entries in each comparison window.
pub const TREND_WINDOW: usize = 7;

/// Percentage change beyond which the trend is reported as up or down.
pub const TREND_THRESHOLD_PERCENT: f64 = 5.0;

/// Additive recovery indicator, 0-30 for in-range input. Higher is better;
/// pain is inverted.
pub fn composite(entry: &ProgressEntry) -> i32 {
    i32::from(METRIC_MAX) - i32::from(entry.pain_level)
        + i32::from(entry.mobility)
        + i32::from(entry.strength)
}

/// Composite score rescaled for charting (0-100 for in-range input).
pub fn recovery_score(entry: &ProgressEntry) -> f64 {
    f64::from(composite(entry)) / 2.8 * 10.0
}

fn mean_composite(entries: &[ProgressEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: i32 = entries.iter().map(composite).sum();
    Some(f64::from(total) / entries.len() as f64)
}

/// Split off the last [`TREND_WINDOW`] entries and the window before them.
///
/// Returns `(recent, older)`; either may be shorter than the window.
pub fn trend_windows(entries: &[ProgressEntry]) -> (&[ProgressEntry], &[ProgressEntry]) {
    let len = entries.len();
    let recent_start = len.saturating_sub(TREND_WINDOW);
    let older_start = len.saturating_sub(2 * TREND_WINDOW);
    (&entries[recent_start..], &entries[older_start..recent_start])
}

/// Signed percentage change of the recent window over the older one.
///
/// With no older entries the older average is taken to equal the recent one,
/// so the change is zero.
pub fn improvement(entries: &[ProgressEntry]) -> f64 {
    let (recent, older) = trend_windows(entries);
    let Some(recent_avg) = mean_composite(recent) else {
        return 0.0;
    };
    let older_avg = mean_composite(older).unwrap_or(recent_avg);
    if older_avg == 0.0 {
        return 0.0;
    }
    (recent_avg - older_avg) / older_avg * 100.0
}

/// Classify a signed improvement percentage.
pub fn classify_trend(improvement: f64) -> Trend {
    if improvement > TREND_THRESHOLD_PERCENT {
        Trend::Up
    } else if improvement < -TREND_THRESHOLD_PERCENT {
        Trend::Down
    } else {
        Trend::Neutral
    }
}

/// Consecutive non-decreasing composite steps ending at the latest entry,
/// counted inside the recent window only.
pub fn streak(entries: &[ProgressEntry]) -> u32 {
    let (recent, _) = trend_windows(entries);
    recent
        .windows(2)
        .rev()
        .take_while(|pair| composite(&pair[1]) >= composite(&pair[0]))
        .count() as u32
}

/// Trend, improvement and streak for an ordered (oldest first) entry list.
pub fn compute_stats(entries: &[ProgressEntry]) -> DerivedStats {
    if entries.is_empty() {
        return DerivedStats::default();
    }
    let change = improvement(entries);
    DerivedStats {
        trend: classify_trend(change),
        improvement_percent: change.abs(),
        streak: streak(entries),
    }
}

/// One entry annotated with display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Entry date
    pub date: Date,

    /// Pain level, 0-10
    pub pain_level: u8,

    /// Mobility, 0-10
    pub mobility: u8,

    /// Strength, 0-10
    pub strength: u8,

    /// Recovery score rounded to one decimal
    pub recovery: f64,

    /// Pain bucket
    pub pain_bucket: PainBucket,
}

impl ChartPoint {
    /// Annotate a single entry.
    pub fn from_entry(entry: &ProgressEntry) -> Self {
        Self {
            date: entry.date,
            pain_level: entry.pain_level,
            mobility: entry.mobility,
            strength: entry.strength,
            recovery: round_tenth(recovery_score(entry)),
            pain_bucket: PainBucket::for_pain(entry.pain_level),
        }
    }

    /// Short date label, e.g. "Jun 3".
    pub fn date_label(&self) -> String {
        self.date.format("%b %-d").to_string()
    }
}

/// Annotate every entry, preserving order.
pub fn annotate(entries: &[ProgressEntry]) -> Vec<ChartPoint> {
    entries.iter().map(ChartPoint::from_entry).collect()
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn entries(metrics: &[(u8, u8, u8)]) -> Vec<ProgressEntry> {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        metrics
            .iter()
            .enumerate()
            .map(|(i, &(p, m, s))| ProgressEntry::new(start + Duration::days(i as i64), p, m, s))
            .collect()
    }

    #[test]
    fn test_empty_list_is_neutral() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.trend, Trend::Neutral);
        assert_eq!(stats.improvement_percent, 0.0);
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn test_single_entry_has_no_improvement() {
        let stats = compute_stats(&entries(&[(5, 5, 5)]));
        assert_eq!(stats.trend, Trend::Neutral);
        assert_eq!(stats.improvement_percent, 0.0);
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn test_strictly_increasing_fourteen_entries() {
        // composites 3..=16, split between mobility and strength at pain 10
        let metrics: Vec<_> = (0..14u8)
            .map(|k| {
                let c = k + 3;
                (10, c / 2, c - c / 2)
            })
            .collect();
        let list = entries(&metrics);
        assert_eq!(composite(&list[0]), 3);
        assert_eq!(composite(&list[13]), 16);

        let stats = compute_stats(&list);
        assert_eq!(stats.trend, Trend::Up);
        assert_eq!(stats.streak, 6);
        // older mean 6, recent mean 13
        assert!((stats.improvement_percent - 700.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_constant_scores() {
        let stats = compute_stats(&entries(&[(4, 6, 6); 7]));
        assert_eq!(stats.streak, 6);
        assert_eq!(stats.trend, Trend::Neutral);
        assert_eq!(stats.improvement_percent, 0.0);
    }

    #[test]
    fn test_short_history_hides_upward_movement() {
        let list = entries(&[(8, 2, 2), (6, 4, 4), (4, 6, 6), (2, 8, 8)]);
        let scores: Vec<_> = list.iter().map(composite).collect();
        assert_eq!(scores, vec![6, 12, 18, 24]);

        let stats = compute_stats(&list);
        assert_eq!(stats.improvement_percent, 0.0);
        assert_eq!(stats.trend, Trend::Neutral);
        assert_eq!(stats.streak, 3);
    }

    #[test]
    fn test_decline_is_reported_down() {
        let mut metrics = vec![(2, 8, 8); 7];
        metrics.extend(vec![(8, 2, 2); 7]);
        let stats = compute_stats(&entries(&metrics));
        assert_eq!(stats.trend, Trend::Down);
        assert!((stats.improvement_percent - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_streak_stops_at_first_decrease() {
        let list = entries(&[(2, 8, 8), (5, 5, 5), (5, 5, 6), (5, 5, 6), (4, 5, 6)]);
        assert_eq!(streak(&list), 3);
    }

    #[test]
    fn test_streak_is_bounded_by_recent_window() {
        let metrics: Vec<_> = (0..12u8).map(|k| (10, k / 2, k - k / 2)).collect();
        assert_eq!(streak(&entries(&metrics)), 6);
    }

    #[test]
    fn test_older_window_only_takes_seven() {
        // 20 entries: the first 6 are far worse and must not count
        let mut metrics = vec![(10, 0, 0); 6];
        metrics.extend(vec![(5, 5, 5); 14]);
        let stats = compute_stats(&entries(&metrics));
        assert_eq!(stats.improvement_percent, 0.0);
        assert_eq!(stats.trend, Trend::Neutral);
    }

    #[test]
    fn test_zero_older_average_does_not_blow_up() {
        let mut metrics = vec![(10, 0, 0); 7];
        metrics.push((5, 5, 5));
        let stats = compute_stats(&entries(&metrics));
        assert!(stats.improvement_percent.is_finite());
        assert_eq!(stats.trend, Trend::Neutral);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let list = entries(&[(3, 4, 5), (2, 6, 7)]);
        let before = list.clone();
        let _ = compute_stats(&list);
        let _ = annotate(&list);
        assert_eq!(list, before);
    }

    #[test]
    fn test_recovery_score_and_annotation() {
        let list = entries(&[(0, 10, 10), (4, 6, 6)]);
        assert!((recovery_score(&list[0]) - 107.142_857).abs() < 1e-3);

        let points = annotate(&list);
        assert_eq!(points[1].recovery, 64.3);
        assert_eq!(points[1].pain_bucket, PainBucket::Medium);
        assert_eq!(points[0].date_label(), "Jun 1");
    }
}
