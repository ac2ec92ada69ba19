//! Frame Stats CLI Application
//!
//! Command-line report generator for profiler frame logs. It uses the
//! frame-stats library and adds:
//! - Four-panel chart rendering (PNG)
//! - The printed summary statistics block
//! - Optional JSON summary export
//! - TOML configuration with flag overrides

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

mod chart;
mod config;
mod report;

use config::{AppConfig, Overrides, ReportOptions};

/// Frame Stats - Charts and summary statistics from profiler frame logs
#[derive(Parser, Debug)]
#[command(name = "frame-stats-cli")]
#[command(about = "Generate charts and summary statistics from profiler frame logs", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the profiler CSV (default: frame_stats.csv)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output image path (default: profiler_metrics.png)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also write the summary statistics as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Rolling window size in frames (default: 60)
    #[arg(long, value_name = "FRAMES")]
    window: Option<usize>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Frame Stats CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using frame-stats library v{}", frame_stats::VERSION);

    let file_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => AppConfig::default(),
    };

    let options = ReportOptions::resolve(
        Overrides {
            input: args.input,
            output: args.output,
            json: args.json,
            window: args.window,
        },
        file_config,
    )?;

    run_report(&options)
}

/// Load the table, derive the statistics, render the chart, print the summary
///
/// Each step either fully succeeds or aborts the run: a load or render
/// failure produces no stdout output at all.
fn run_report(options: &ReportOptions) -> Result<()> {
    let table = frame_stats::load_csv(&options.input)
        .with_context(|| format!("Failed to load frame stats from {:?}", options.input))?;

    let rolling = frame_stats::rolling_mean(&table.totals(), options.window);
    let fps = frame_stats::fps_series(&rolling);
    let summary = frame_stats::Summary::from_table(&table, options.window);

    chart::render(&table, &fps, options.window, options.chart_size, &options.image)
        .with_context(|| format!("Failed to render chart to {:?}", options.image))?;
    println!("Graphs saved to '{}'", options.image.display());

    report::print_summary(&summary).context("Failed to write summary to stdout")?;

    if let Some(path) = &options.json {
        report::write_json(&summary, path)?;
        log::info!("Summary JSON written to {:?}", path);
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    // The summary block owns stdout; log chatter stays on stderr and is
    // opt-in via -v
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
