//! Chart rendering. Every chart is written as a separate image into the output directory.

pub mod line;
pub mod series;
pub mod surface;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{instrument, warn};

use crate::{
    analysis::{
        buckets::{day_buckets, day_stats},
        fit::Polynomial,
        rolling::{rolling_day_average, rolling_sample_average},
    },
    extract::entities::Sample,
};
use line::render_line_chart;
use series::{
    accuracy_axis, day_points, day_stats_series, first_day, fit_points, index_points,
    sample_points, wpm_axis, Series, XAxis, DEFAULT_COLOR, FIT_COLOR, ROLLING_COLOR,
};
use surface::{render_surface, SurfaceOptions};

pub const WPM_CHART: &str = "macro_wpm.png";
pub const ACCURACY_CHART: &str = "macro_accuracy.png";
pub const WPM_STATS_CHART: &str = "macro_wpm_stats.png";
pub const DAY_ROLLING_CHART: &str = "macro_wpm_rolling_avg.png";
pub const SURFACE_CHART: &str = "rolling_surface.gif";

pub fn sample_rolling_chart(window: usize) -> String {
    format!("rolling_{window}.png")
}

pub fn sample_rolling_fit_chart(window: usize) -> String {
    format!("rolling_{window}_fit.png")
}

#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub title_size: u32,
    pub margin: u32,
    pub y_step: f64,
    pub legend: bool,
}

impl ChartConfig {
    pub fn new(title: impl Into<String>, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            ..Default::default()
        }
    }

    pub fn with_y_step(self, y_step: f64) -> Self {
        Self { y_step, ..self }
    }

    pub fn with_legend(self) -> Self {
        Self {
            legend: true,
            ..self
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            width: 1000,
            height: 600,
            title_size: 24,
            margin: 20,
            y_step: 5.,
            legend: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    pub day_window: usize,
    pub sample_window: usize,
    pub fit_degree: usize,
    pub surface: Option<SurfaceOptions>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            day_window: 7,
            sample_window: 100,
            fit_degree: 3,
            surface: None,
        }
    }
}

/// Renders every chart into `out_dir` and returns the written paths. Nothing is written for an
/// empty sample list.
#[instrument(skip(samples))]
pub fn render_charts(
    samples: &[Sample],
    out_dir: &Path,
    options: &ChartOptions,
) -> Result<Vec<PathBuf>> {
    let Some(origin) = first_day(samples) else {
        return Ok(vec![]);
    };
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {out_dir:?}"))?;

    let mut written = vec![];
    let time_axis = XAxis::Days { origin };
    let max_wpm = samples.iter().map(|v| v.wpm).fold(0., f64::max);

    let path = out_dir.join(WPM_CHART);
    render_line_chart(
        &path,
        &ChartConfig::new("WPM Over Time", "Date", "WPM"),
        time_axis,
        wpm_axis(max_wpm),
        &[Series::new("WPM", DEFAULT_COLOR, sample_points(samples, origin, |v| v.wpm))],
    )?;
    written.push(path);

    let min_accuracy = samples.iter().map(|v| *v.accuracy).fold(100., f64::min);
    let path = out_dir.join(ACCURACY_CHART);
    render_line_chart(
        &path,
        &ChartConfig::new("Accuracy Over Time", "Date", "Accuracy (%)").with_y_step(2.),
        time_axis,
        accuracy_axis(min_accuracy),
        &[Series::new(
            "Accuracy",
            DEFAULT_COLOR,
            sample_points(samples, origin, |v| *v.accuracy),
        )],
    )?;
    written.push(path);

    let buckets = day_buckets(samples);
    let path = out_dir.join(WPM_STATS_CHART);
    render_line_chart(
        &path,
        &ChartConfig::new("WPM Statistics Over Time", "Date", "WPM").with_legend(),
        time_axis,
        wpm_axis(max_wpm),
        &day_stats_series(&day_stats(&buckets), origin),
    )?;
    written.push(path);

    let rolling = rolling_day_average(&buckets, options.day_window);
    let path = out_dir.join(DAY_ROLLING_CHART);
    let title = format!("{}-day Rolling Average WPM Over Time", options.day_window);
    render_line_chart(
        &path,
        &ChartConfig::new(title, "Date", "WPM").with_legend(),
        time_axis,
        wpm_axis(max_wpm),
        &[Series::new(
            format!("{}-day Avg WPM", options.day_window),
            ROLLING_COLOR,
            day_points(buckets.iter().map(|v| v.day), rolling.into_iter(), origin),
        )],
    )?;
    written.push(path);

    let rolling = rolling_sample_average(samples, options.sample_window);
    let rolling_series = Series::new(
        format!("{}-sample Avg WPM", options.sample_window),
        ROLLING_COLOR,
        index_points(&rolling),
    )
    .without_markers();
    let title = format!("{}-sample Rolling Average WPM", options.sample_window);

    let path = out_dir.join(sample_rolling_chart(options.sample_window));
    render_line_chart(
        &path,
        &ChartConfig::new(title.clone(), "Sample", "WPM").with_legend(),
        XAxis::Index,
        wpm_axis(max_wpm),
        &[rolling_series.clone()],
    )?;
    written.push(path);

    let mut fitted = vec![rolling_series];
    match Polynomial::fit(&index_points(&rolling), options.fit_degree) {
        Some(fit) => fitted.push(
            Series::new(
                format!("Degree {} fit", fit.degree()),
                FIT_COLOR,
                fit_points(&fit, rolling.len()),
            )
            .without_markers(),
        ),
        None => warn!("Couldn't fit a curve through {} points", rolling.len()),
    }
    let path = out_dir.join(sample_rolling_fit_chart(options.sample_window));
    render_line_chart(
        &path,
        &ChartConfig::new(format!("{title} (fitted)"), "Sample", "WPM").with_legend(),
        XAxis::Index,
        wpm_axis(max_wpm),
        &fitted,
    )?;
    written.push(path);

    if let Some(surface) = options.surface {
        let wpm = samples.iter().map(|v| v.wpm).collect::<Vec<_>>();
        let path = out_dir.join(SURFACE_CHART);
        if wpm.len() < 2 {
            warn!("Skipping {SURFACE_CHART}, not enough samples");
        } else {
            render_surface(
                &path,
                &ChartConfig::new("Rolling Average WPM by Window Size", "Sample", "WPM"),
                &wpm,
                surface,
            )?;
            written.push(path);
        }
    }

    Ok(written)
}
