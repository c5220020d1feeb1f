use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Janus growth-rate VAR forecaster.
#[derive(Parser)]
#[command(
    name = "janus",
    version,
    about = "Short-horizon GDP forecasts from a growth-rate VAR"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file (defaults apply if omitted and
    /// `janus.toml` is absent).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fit the VAR on the level data and write the model bundle.
    Train(TrainArgs),
    /// Forecast GDP from a trained model bundle.
    Forecast(ForecastArgs),
    /// Summarise the level data.
    Describe(DescribeArgs),
}

/// Arguments for the `train` subcommand.
#[derive(clap::Args)]
pub struct TrainArgs {
    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override bundle output path from config.
    #[arg(short, long)]
    pub bundle: Option<PathBuf>,

    /// Override the largest lag order considered.
    #[arg(long = "max-lag")]
    pub max_lag: Option<usize>,

    /// Override the selection criterion (aic, bic, hqic, fpe).
    #[arg(long)]
    pub criterion: Option<String>,
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Override bundle path from config.
    #[arg(short, long)]
    pub bundle: Option<PathBuf>,

    /// Override the number of years to forecast.
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Override the significance level of the intervals.
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Also write the forecast as JSON to this path.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Arguments for the `describe` subcommand.
#[derive(clap::Args)]
pub struct DescribeArgs {
    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Print every row of the cleaned data.
    #[arg(long)]
    pub table: bool,
}
