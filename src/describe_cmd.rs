//! Describe command: summary of the level data.

use anyhow::{Context, Result};
use tracing::info_span;

use janus_io::read_csv;
use janus_panel::TimeSeriesPanel;
use janus_stats::{compound_growth_rate, summarize};

use crate::cli::DescribeArgs;
use crate::config::JanusConfig;
use crate::convert;

/// Run the describe command.
pub fn run(args: DescribeArgs, mut config: JanusConfig) -> Result<()> {
    let _cmd = info_span!("describe").entered();

    if let Some(input) = args.input {
        config.io.input = input;
    }
    let input = &config.io.input;
    if !input.exists() {
        println!("No data file found at {}.", input.display());
        return Ok(());
    }

    let reader_cfg = convert::build_reader_config(&config.io)?;
    let panel = read_csv(input, &reader_cfg)
        .with_context(|| format!("failed to load data: {}", input.display()))?
        .complete_cases();

    print_summary(&panel);
    if args.table {
        println!();
        print_table(&panel);
    }
    Ok(())
}

fn print_summary(panel: &TimeSeriesPanel) {
    let years = panel.years();
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => {
            println!("{} complete years, {first} to {last}", years.len());
        }
        _ => {
            println!("No complete years in the data.");
            return;
        }
    }

    println!(
        "{:<24} {:>5} {:>14} {:>14} {:>14} {:>14} {:>14} {:>8}",
        "series", "n", "mean", "sd", "min", "median", "max", "CAGR %"
    );
    for name in panel.names() {
        let Some(col) = panel.column(name) else {
            continue;
        };
        let values = col.to_vec();
        let Some(s) = summarize(&values) else {
            continue;
        };
        let cagr = series_cagr(&values).map_or_else(|| "-".to_string(), |g| format!("{g:.2}"));
        println!(
            "{name:<24} {:>5} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {cagr:>8}",
            s.count, s.mean, s.sd, s.min, s.median, s.max
        );
    }
}

/// Compound annual growth between the first and last observation.
fn series_cagr(values: &[f64]) -> Option<f64> {
    match (values.first(), values.last()) {
        (Some(&a), Some(&b)) => compound_growth_rate(a, b, values.len() - 1),
        _ => None,
    }
}

fn print_table(panel: &TimeSeriesPanel) {
    print!("{:>6}", "year");
    for name in panel.names() {
        print!(" {name:>16}");
    }
    println!();
    for (year, row) in panel.years().iter().zip(panel.values().rows()) {
        print!("{year:>6}");
        for v in row {
            print!(" {v:>16.2}");
        }
        println!();
    }
}
