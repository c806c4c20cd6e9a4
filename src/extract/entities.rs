use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::utils::percentage::Percentage;

/// One typing test result taken from a chat export. Samples are never modified after they are
/// extracted, statistics are always computed from copies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub moment: NaiveDateTime,
    pub wpm: f64,
    pub accuracy: Percentage,
}

impl Sample {
    pub fn day(&self) -> NaiveDate {
        self.moment.date()
    }
}

/// Optional `[start, end)` window applied to extracted samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl SampleRange {
    pub fn contains(&self, sample: &Sample) -> bool {
        self.start.map_or(true, |start| sample.moment >= start)
            && self.end.map_or(true, |end| sample.moment < end)
    }

    pub fn filter(&self, samples: Vec<Sample>) -> Vec<Sample> {
        samples.into_iter().filter(|v| self.contains(v)).collect()
    }
}
