//! Progress Metrics
//!
//! Composite recovery scores, trend and streak detection, pain distribution,
//! window slicing and overview figures for a user's logged history.

#![warn(missing_docs)]

pub mod engine;
pub mod distribution;
pub mod window;
pub mod summary;
pub mod report;

pub use engine::{
    composite, recovery_score, compute_stats, improvement, classify_trend, streak, annotate,
    trend_windows, ChartPoint, TREND_WINDOW, TREND_THRESHOLD_PERCENT,
};
pub use distribution::{PainDistribution, DistributionSlice};
pub use window::{TimeWindow, ParseWindowError};
pub use summary::{
    OverviewSummary, WeeklyBar, pain_reduction_percent, days_in_recovery, weekly_bars, insights,
    greeting,
};
pub use report::ProgressReport;
