mod cli;
mod config;
mod convert;
mod describe_cmd;
mod forecast_cmd;
mod logging;
mod train_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Train(args) => train_cmd::run(args, config),
        Command::Forecast(args) => forecast_cmd::run(args, config),
        Command::Describe(args) => describe_cmd::run(args, config),
    }
}
