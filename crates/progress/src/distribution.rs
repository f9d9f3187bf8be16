//! Pain level distribution across all entries.

use rehabfit_core::{PainBucket, ProgressEntry};
use serde::Serialize;

/// Entry counts per pain bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PainDistribution {
    counts: [usize; 3],
}

/// One slice of the distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSlice {
    /// Bucket
    pub bucket: PainBucket,

    /// Bucket label, e.g. "Low (0-3)"
    pub label: &'static str,

    /// Fill colour
    pub color: &'static str,

    /// Number of entries in the bucket
    pub count: usize,

    /// Share of all entries, 0.0-1.0
    pub share: f64,
}

impl PainDistribution {
    /// Bucket every entry by pain level.
    pub fn from_entries(entries: &[ProgressEntry]) -> Self {
        let mut counts = [0usize; 3];
        for entry in entries {
            counts[bucket_index(PainBucket::for_pain(entry.pain_level))] += 1;
        }
        Self { counts }
    }

    /// Count for a bucket.
    pub fn count(&self, bucket: PainBucket) -> usize {
        self.counts[bucket_index(bucket)]
    }

    /// Total entries counted.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// All buckets in fixed order, including empty ones.
    pub fn slices(&self) -> Vec<DistributionSlice> {
        let total = self.total();
        PainBucket::ALL
            .iter()
            .map(|&bucket| {
                let count = self.count(bucket);
                DistributionSlice {
                    bucket,
                    label: bucket.label(),
                    color: bucket.color(),
                    count,
                    share: if total == 0 { 0.0 } else { count as f64 / total as f64 },
                }
            })
            .collect()
    }

    /// Non-empty buckets only, still in fixed order.
    pub fn non_empty_slices(&self) -> Vec<DistributionSlice> {
        self.slices().into_iter().filter(|s| s.count > 0).collect()
    }
}

fn bucket_index(bucket: PainBucket) -> usize {
    match bucket {
        PainBucket::Low => 0,
        PainBucket::Medium => 1,
        PainBucket::High => 2,
    }
}
