use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::extract::entities::Sample;

/// Samples that share a calendar day, in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub day: NaiveDate,
    pub samples: Vec<Sample>,
}

impl DayBucket {
    pub fn mean_wpm(&self) -> f64 {
        mean(self.samples.iter().map(|v| v.wpm))
    }
}

/// Partitions samples by day. Buckets are sorted by day and never empty.
pub fn day_buckets(samples: &[Sample]) -> Vec<DayBucket> {
    let mut days = BTreeMap::<NaiveDate, Vec<Sample>>::new();
    for sample in samples {
        days.entry(sample.day()).or_default().push(*sample);
    }
    days.into_iter()
        .map(|(day, samples)| DayBucket { day, samples })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayStats {
    pub day: NaiveDate,
    pub count: usize,
    pub min_wpm: f64,
    pub max_wpm: f64,
    pub median_wpm: f64,
    pub mean_wpm: f64,
    pub mean_accuracy: f64,
}

impl DayStats {
    pub fn from_bucket(bucket: &DayBucket) -> Self {
        let mut wpm = bucket.samples.iter().map(|v| v.wpm).collect::<Vec<_>>();
        wpm.sort_by(f64::total_cmp);

        Self {
            day: bucket.day,
            count: wpm.len(),
            min_wpm: wpm.first().copied().unwrap_or_default(),
            max_wpm: wpm.last().copied().unwrap_or_default(),
            // Even sized days take the element right after the middle, nothing is averaged.
            median_wpm: wpm.get(wpm.len() / 2).copied().unwrap_or_default(),
            mean_wpm: mean(wpm.iter().copied()),
            mean_accuracy: mean(bucket.samples.iter().map(|v| *v.accuracy)),
        }
    }
}

pub fn day_stats(buckets: &[DayBucket]) -> Vec<DayStats> {
    buckets.iter().map(DayStats::from_bucket).collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0., 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.
    } else {
        sum / count as f64
    }
}
