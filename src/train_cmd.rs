//! Train command: fit the growth-rate VAR and write the model bundle.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use janus_diagnostics::{DiagnosticsReport, diagnose};
use janus_io::{ModelBundle, read_csv, write_bundle};
use janus_var::{InfoCriterion, LagCandidate, select_lag};

use crate::cli::TrainArgs;
use crate::config::JanusConfig;
use crate::convert;

/// Run the training pipeline.
pub fn run(args: TrainArgs, mut config: JanusConfig) -> Result<()> {
    let _cmd = info_span!("train").entered();

    // 1. Merge CLI overrides
    if let Some(input) = args.input {
        config.io.input = input;
    }
    if let Some(bundle) = args.bundle {
        config.io.bundle = bundle;
    }
    if let Some(max_lag) = args.max_lag {
        config.model.max_lag = max_lag;
    }
    if let Some(criterion) = args.criterion {
        config.model.criterion = criterion;
    }
    let criterion = convert::parse_criterion(&config.model.criterion)?;
    if config.model.max_lag == 0 {
        bail!("max_lag must be at least 1");
    }
    if config.model.series.is_empty() {
        bail!("no series configured: set [model].series");
    }

    // 2. Load levels
    let reader_cfg = convert::build_reader_config(&config.io)?;
    let input = &config.io.input;
    info!(path = %input.display(), "reading level data");
    let level_panel = read_csv(input, &reader_cfg)
        .with_context(|| format!("failed to load data: {}", input.display()))?;

    // 3. Select system, drop incomplete years, convert to growth
    let names: Vec<&str> = config.model.series.iter().map(String::as_str).collect();
    let system = level_panel
        .select(&names)
        .context("configured series missing from data")?
        .complete_cases();
    info!(rows = system.n_rows(), series = system.n_series(), "system panel");
    let growth_panel = system
        .growth_rates(config.model.max_lag)
        .context("not enough usable years for the requested lag order")?;

    // 4. Lag selection and fit
    let max_lag = config.model.max_lag;
    let selection =
        select_lag(&growth_panel, max_lag, criterion).context("VAR estimation failed")?;
    let model_fit = selection.fit;

    // 5. Diagnostics
    let diagnostics = diagnose(&model_fit);

    print_selection(&selection.candidates, criterion, model_fit.lag_order());
    print_diagnostics(&diagnostics);

    // 6. Persist
    let bundle = ModelBundle {
        model_fit,
        growth_panel,
        level_panel,
        diagnostics,
    };
    write_bundle(&config.io.bundle, &bundle)
        .with_context(|| format!("failed to write bundle: {}", config.io.bundle.display()))?;
    println!("Model bundle written to {}", config.io.bundle.display());

    Ok(())
}

fn print_selection(candidates: &[LagCandidate], criterion: InfoCriterion, chosen: usize) {
    println!("Lag order selection ({criterion}):");
    println!("{:>4} {:>12} {:>12} {:>12} {:>12}", "p", "AIC", "BIC", "HQIC", "FPE");
    for c in candidates {
        let mark = if c.p == chosen { "*" } else { "" };
        println!(
            "{:>4} {:>12.4} {:>12.4} {:>12.4} {:>12.4e}{mark}",
            c.p, c.aic, c.bic, c.hqic, c.fpe
        );
    }
    println!("Selected lag order: {chosen}");
}

fn print_diagnostics(report: &DiagnosticsReport) {
    println!();
    println!("Residual diagnostics:");
    println!("{:<24} {:>10} {:>14}", "series", "DW", "Shapiro p");
    let names = report
        .durbin_watson
        .keys()
        .chain(report.shapiro_wilk.keys())
        .collect::<std::collections::BTreeSet<_>>();
    for name in names {
        let dw = report
            .durbin_watson
            .get(name)
            .map_or_else(|| "-".to_string(), |v| format!("{v:.3}"));
        let sw = report
            .shapiro_wilk
            .get(name)
            .map_or_else(|| "-".to_string(), |s| format!("{:.4}", s.p_value));
        println!("{name:<24} {dw:>10} {sw:>14}");
    }
    match &report.white_test {
        Some(w) => println!(
            "White test: LM = {:.3}, df = {}, p = {:.4}",
            w.statistic, w.df, w.p_value
        ),
        None => println!("White test: could not be computed"),
    }
}
