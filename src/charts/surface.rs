use std::{f64::consts::TAU, path::Path};

use anyhow::{bail, Result};
use plotters::prelude::*;
use tracing::info;

use super::ChartConfig;
use crate::analysis::rolling::rolling_surface;

/// Meshes with more cells than this per axis render slowly and look like noise.
const MAX_AXIS_POINTS: usize = 60;

#[derive(Debug, Clone, Copy)]
pub struct SurfaceOptions {
    pub max_window: usize,
    pub frames: u32,
    /// Milliseconds between frames.
    pub frame_delay: u32,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            max_window: 200,
            frames: 60,
            frame_delay: 80,
        }
    }
}

/// Rolling averages for every window size up to `max_window`, laid out as a surface over
/// sample index and window size. The camera makes one full turn over the animation.
pub fn render_surface(
    path: &Path,
    config: &ChartConfig,
    values: &[f64],
    options: SurfaceOptions,
) -> Result<()> {
    if values.len() < 2 {
        bail!("Rolling surface needs at least 2 samples, got {}", values.len());
    }
    let max_window = options.max_window.clamp(1, values.len());
    let xs = sampled_axis(0, values.len() - 1);
    let zs = sampled_axis(1, max_window);
    // Row `i` belongs to window `zs[i]`.
    let grid = rolling_surface(values, zs.iter().copied());

    let (y_min, y_max) = grid
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(*v), max.max(*v))
        });
    let y_padding = ((y_max - y_min) * 0.05).max(1.);

    let root = BitMapBackend::gif(path, (config.width, config.height), options.frame_delay)?
        .into_drawing_area();

    let frames = options.frames.max(1);
    for frame in 0..frames {
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&config.title, ("sans-serif", config.title_size))
            .margin(config.margin)
            .build_cartesian_3d(
                0f64..(values.len() - 1) as f64,
                (y_min - y_padding)..(y_max + y_padding),
                1f64..(max_window as f64).max(2.),
            )?;

        chart.with_projection(|mut pb| {
            pb.yaw = TAU * frame as f64 / frames as f64;
            pb.pitch = 0.5;
            pb.scale = 0.75;
            pb.into_matrix()
        });

        chart
            .configure_axes()
            .light_grid_style(BLACK.mix(0.1))
            .max_light_lines(3)
            .draw()?;

        chart.draw_series(
            SurfaceSeries::xoz(
                xs.iter().map(|x| *x as f64),
                zs.iter().map(|z| *z as f64),
                |x, z| grid[zs.partition_point(|w| *w < z as usize)][x as usize],
            )
            .style(BLUE.mix(0.3).filled()),
        )?;

        root.present()?;
    }

    info!(
        "Rendered {} frames of {} to {}",
        frames,
        config.title,
        path.display()
    );
    Ok(())
}

/// At most [MAX_AXIS_POINTS] evenly spread points of `first..=last`.
fn sampled_axis(first: usize, last: usize) -> Vec<usize> {
    let step = (last + 1 - first).div_ceil(MAX_AXIS_POINTS).max(1);
    (first..=last).step_by(step).collect()
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::{render_surface, sampled_axis, SurfaceOptions, MAX_AXIS_POINTS};
    use crate::charts::{ChartConfig, SURFACE_CHART};

    #[test]
    fn axes_are_downsampled() {
        assert_eq!(sampled_axis(1, 5), vec![1, 2, 3, 4, 5]);

        let windows = sampled_axis(1, 200);
        assert!(windows.len() <= MAX_AXIS_POINTS);
        assert_eq!(windows[0], 1);
        assert!(windows.windows(2).all(|v| v[0] < v[1]));

        assert_eq!(sampled_axis(0, 99_999).len(), MAX_AXIS_POINTS);
    }

    #[test]
    fn single_sample_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(SURFACE_CHART);
        let result = render_surface(
            &path,
            &ChartConfig::default(),
            &[60.],
            SurfaceOptions::default(),
        );
        assert!(result.is_err());
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn renders_animation() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(SURFACE_CHART);
        let values = (0..500).map(|i| 40. + (i % 37) as f64).collect::<Vec<_>>();
        render_surface(
            &path,
            &ChartConfig::new("Surface", "Sample", "WPM"),
            &values,
            SurfaceOptions {
                max_window: 50,
                frames: 3,
                ..Default::default()
            },
        )?;
        assert!(path.exists());
        Ok(())
    }
}
