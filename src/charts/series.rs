use chrono::NaiveDate;
use plotters::style::RGBColor;

use crate::{
    analysis::{buckets::DayStats, fit::Polynomial},
    extract::entities::Sample,
    utils::time::{day_from_offset, day_offset},
};

pub const DEFAULT_COLOR: RGBColor = RGBColor(31, 119, 180);
pub const MAX_COLOR: RGBColor = RGBColor(0, 0, 255);
pub const MIN_COLOR: RGBColor = RGBColor(255, 0, 0);
pub const MEDIAN_COLOR: RGBColor = RGBColor(0, 0, 0);
pub const ROLLING_COLOR: RGBColor = RGBColor(0, 128, 0);
pub const FIT_COLOR: RGBColor = RGBColor(255, 127, 14);

/// A named line on a chart.
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
    pub markers: bool,
}

impl Series {
    pub fn new(name: impl Into<String>, color: RGBColor, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            color,
            points,
            markers: true,
        }
    }

    pub fn without_markers(self) -> Self {
        Self {
            markers: false,
            ..self
        }
    }
}

/// How x coordinates are turned into labels.
#[derive(Debug, Clone, Copy)]
pub enum XAxis {
    /// x is [day_offset] from the origin.
    Days { origin: NaiveDate },
    /// x is a sample index.
    Index,
}

impl XAxis {
    pub fn label(&self, x: f64) -> String {
        match self {
            XAxis::Days { origin } => day_from_offset(*origin, x).format("%b %d").to_string(),
            XAxis::Index => format!("{x:.0}"),
        }
    }
}

/// First day with a sample. Used as the origin of time charts.
pub fn first_day(samples: &[Sample]) -> Option<NaiveDate> {
    samples.iter().map(Sample::day).min()
}

pub fn sample_points(
    samples: &[Sample],
    origin: NaiveDate,
    value: impl Fn(&Sample) -> f64,
) -> Vec<(f64, f64)> {
    samples
        .iter()
        .map(|v| (day_offset(origin, v.moment), value(v)))
        .collect()
}

pub fn day_points(
    days: impl Iterator<Item = NaiveDate>,
    values: impl Iterator<Item = f64>,
    origin: NaiveDate,
) -> Vec<(f64, f64)> {
    days.zip(values)
        .map(|(day, value)| (day_offset(origin, day.and_time(chrono::NaiveTime::MIN)), value))
        .collect()
}

/// Max, min and median lines of every day.
pub fn day_stats_series(stats: &[DayStats], origin: NaiveDate) -> Vec<Series> {
    let line = |name: &str, color: RGBColor, value: fn(&DayStats) -> f64| {
        Series::new(
            name,
            color,
            day_points(stats.iter().map(|v| v.day), stats.iter().map(value), origin),
        )
    };
    vec![
        line("Max WPM", MAX_COLOR, |v| v.max_wpm),
        line("Min WPM", MIN_COLOR, |v| v.min_wpm),
        line("Median WPM", MEDIAN_COLOR, |v| v.median_wpm),
    ]
}

pub fn index_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect()
}

/// Evaluates a fit at every index of the fitted series.
pub fn fit_points(fit: &Polynomial, len: usize) -> Vec<(f64, f64)> {
    (0..len).map(|i| (i as f64, fit.eval(i as f64))).collect()
}

/// WPM charts show at least `0..100` in steps of 5. Faster results stretch the axis.
pub fn wpm_axis(max_wpm: f64) -> (f64, f64) {
    (0., (max_wpm / 5.).ceil().max(20.) * 5.)
}

/// Accuracy axis starts at the lowest accuracy rounded down to an even number.
pub fn accuracy_axis(min_accuracy: f64) -> (f64, f64) {
    let start = 2. * (min_accuracy / 2.).floor();
    (start.min(98.), 100.)
}

pub fn x_range(series: &[Series]) -> (f64, f64) {
    let xs = series.iter().flat_map(|v| v.points.iter().map(|p| p.0));
    let (min, max) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), x| {
        (min.min(x), max.max(x))
    });
    if !min.is_finite() {
        (0., 1.)
    } else if min == max {
        (min - 1., max + 1.)
    } else {
        (min, max)
    }
}
