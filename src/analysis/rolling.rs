use super::buckets::DayBucket;
use crate::extract::entities::Sample;

/// Mean over a trailing window. Element `i` averages the last `min(window, i + 1)` values, so
/// the start of the series is averaged over whatever is available. A zero window acts as 1.
pub fn trailing_means(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut means = Vec::with_capacity(values.len());
    let mut sum = 0.;
    for (i, value) in values.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= values[i - window];
        }
        means.push(sum / (i + 1).min(window) as f64);
    }
    means
}

/// Rolling average over days. Each day contributes its mean wpm regardless of how many tests
/// were taken that day.
pub fn rolling_day_average(buckets: &[DayBucket], window: usize) -> Vec<f64> {
    let daily = buckets.iter().map(DayBucket::mean_wpm).collect::<Vec<_>>();
    trailing_means(&daily, window)
}

/// Rolling average over raw samples in extraction order.
pub fn rolling_sample_average(samples: &[Sample], window: usize) -> Vec<f64> {
    let wpm = samples.iter().map(|v| v.wpm).collect::<Vec<_>>();
    trailing_means(&wpm, window)
}

/// One row of [trailing_means] per requested window size, in the order given.
pub fn rolling_surface(values: &[f64], windows: impl IntoIterator<Item = usize>) -> Vec<Vec<f64>> {
    windows
        .into_iter()
        .map(|window| trailing_means(values, window))
        .collect()
}
