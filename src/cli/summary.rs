use std::io::Write;

use anyhow::Result;
use clap::Parser;

use crate::analysis::{
    buckets::{day_buckets, day_stats, DayStats},
    rolling::rolling_day_average,
};

use super::{extract_input, input::InputArgs, parse_window};

#[derive(Debug, Parser)]
pub struct SummaryCommand {
    #[command(flatten)]
    input: InputArgs,
    #[arg(long, default_value_t = 7, value_parser = parse_window, help = "Days in the rolling average")]
    day_window: usize,
}

/// Prints one line of statistics per day.
pub async fn process_summary_command(
    SummaryCommand { input, day_window }: SummaryCommand,
) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    let samples = extract_input(&input, &mut stdout).await?;

    let buckets = day_buckets(&samples);
    let rolling = rolling_day_average(&buckets, day_window);
    writeln!(stdout)?;
    print_day_table(&mut stdout, &day_stats(&buckets), &rolling, day_window)
}

fn print_day_table(
    out: &mut impl Write,
    stats: &[DayStats],
    rolling: &[f64],
    day_window: usize,
) -> Result<()> {
    writeln!(
        out,
        "date\ttests\tmin\tmedian\tmax\taccuracy\t{day_window}-day avg"
    )?;
    for (day, rolling) in stats.iter().zip(rolling) {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{:.1}%\t{:.1}",
            day.day.format("%x"),
            day.count,
            day.min_wpm,
            day.median_wpm,
            day.max_wpm,
            day.mean_accuracy,
            rolling
        )?;
    }
    Ok(())
}
