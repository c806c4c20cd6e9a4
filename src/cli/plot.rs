use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::Parser;

use crate::charts::{render_charts, surface::SurfaceOptions, ChartOptions};

use super::{extract_input, input::InputArgs, parse_window};

#[derive(Debug, Parser)]
pub struct PlotCommand {
    #[command(flatten)]
    input: InputArgs,
    #[arg(long, default_value = ".", help = "Directory where charts are written")]
    out: PathBuf,
    #[arg(long, default_value_t = 7, value_parser = parse_window, help = "Days in the rolling average")]
    day_window: usize,
    #[arg(long, default_value_t = 100, value_parser = parse_window, help = "Samples in the rolling average")]
    sample_window: usize,
    #[arg(long, default_value_t = 3, help = "Degree of the polynomial fitted to the sample rolling average")]
    fit_degree: usize,
    #[arg(long, help = "Also render a rotating 3D surface of rolling averages by window size")]
    surface: bool,
    #[arg(long, default_value_t = 200, value_parser = parse_window, help = "Largest window of the surface")]
    surface_max_window: usize,
    #[arg(long, default_value_t = 60, help = "Frames in the surface animation")]
    surface_frames: u32,
}

impl PlotCommand {
    fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            day_window: self.day_window,
            sample_window: self.sample_window,
            fit_degree: self.fit_degree,
            surface: self.surface.then(|| SurfaceOptions {
                max_window: self.surface_max_window,
                frames: self.surface_frames,
                ..Default::default()
            }),
        }
    }
}

/// Extracts every result, prints diagnostics and renders the charts.
pub async fn process_plot_command(command: PlotCommand) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    let samples = extract_input(&command.input, &mut stdout).await?;

    if samples.is_empty() {
        writeln!(stdout, "No data points found to plot.")?;
        return Ok(());
    }

    for path in render_charts(&samples, &command.out, &command.chart_options())? {
        writeln!(stdout, "Saved {}", path.display())?;
    }
    Ok(())
}
