use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;
use tracing::info;

use super::{
    series::{x_range, Series, XAxis},
    ChartConfig,
};

/// Renders line series into a png. Series with markers also get a dot on every point.
pub fn render_line_chart(
    path: &Path,
    config: &ChartConfig,
    x_axis: XAxis,
    (y_min, y_max): (f64, f64),
    series: &[Series],
) -> Result<()> {
    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = x_range(series);
    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", config.title_size))
        .margin(config.margin)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    let y_labels = ((y_max - y_min) / config.y_step).round() as usize + 1;
    let x_formatter = |x: &f64| x_axis.label(*x);
    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .y_labels(y_labels)
        .x_label_formatter(&x_formatter)
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.2))
        .draw()?;

    for line in series {
        let color = line.color;
        chart
            .draw_series(LineSeries::new(
                line.points.iter().copied(),
                color.stroke_width(1),
            ))?
            .label(&line.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], color));

        if line.markers {
            chart.draw_series(
                line.points
                    .iter()
                    .map(|point| Circle::new(*point, 2, color.filled())),
            )?;
        }
    }

    if config.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    info!("Rendered {} to {}", config.title, path.display());
    Ok(())
}
