pub mod input;
pub mod plot;
pub mod report;
pub mod samples;
pub mod summary;

use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use plot::{process_plot_command, PlotCommand};
use samples::{process_samples_command, SamplesCommand};
use summary::{process_summary_command, SummaryCommand};
use tracing::{info, level_filters::LevelFilter};

use crate::{
    extract::{entities::Sample, extract_all},
    utils::{
        dir::create_application_default_path,
        logging::{enable_logging, CLI_PREFIX},
    },
};
use input::InputArgs;

#[derive(Parser, Debug)]
#[command(name = "Typetrend", version, long_about = None)]
#[command(about = "Typing practice trends from chat exports", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Show logs in the console")]
    log: bool,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Extract results and render trend charts")]
    Plot {
        #[command(flatten)]
        command: PlotCommand,
    },
    #[command(about = "Print per day statistics")]
    Summary {
        #[command(flatten)]
        command: SummaryCommand,
    },
    #[command(about = "Print extracted results as json lines")]
    Samples {
        #[command(flatten)]
        command: SamplesCommand,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(
        CLI_PREFIX,
        &create_application_default_path()?,
        logging_level,
        args.log,
    )?;

    match args.commands {
        Commands::Plot { command } => process_plot_command(command).await,
        Commands::Summary { command } => process_summary_command(command).await,
        Commands::Samples { command } => process_samples_command(command).await,
    }
}

/// Runs extraction for the given input, printing per message diagnostics and per file counts
/// into `out`. Returns samples inside the requested range.
async fn extract_input(input: &InputArgs, out: &mut impl Write) -> Result<Vec<Sample>> {
    let range = input.range()?;
    let pattern = input.pattern()?;

    let extraction = extract_all(input.source(), &pattern, |name, outcomes| {
        report::print_file_outcomes(out, name, outcomes)
    })
    .await?;
    report::print_file_counts(out, &extraction.files)?;

    let total = extraction.samples.len();
    let samples = range.filter(extraction.samples);
    info!("Using {} of {} samples", samples.len(), total);
    Ok(samples)
}

fn parse_window(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("window has to be at least 1".to_string()),
        Ok(v) => Ok(v),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{parse_window, Args, Commands};

    #[test]
    fn windows_are_positive() {
        assert_eq!(parse_window("7"), Ok(7));
        assert!(parse_window("0").is_err());
        assert!(parse_window("-3").is_err());
    }

    #[test]
    fn plot_defaults() {
        let args = Args::try_parse_from(["typetrend", "plot"]).unwrap();
        assert!(!args.log);
        let Commands::Plot { command } = args.commands else {
            panic!("expected plot");
        };
        assert!(format!("{command:?}").contains("day_window: 7"));
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(Args::try_parse_from(["typetrend", "summary", "--day-window", "0"]).is_err());
    }

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
