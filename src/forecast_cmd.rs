//! Forecast command: GDP growth and level forecasts from a trained bundle.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{info, info_span};

use janus_io::{ModelBundle, read_bundle};
use janus_panel::{LevelInterval, reconstruct_interval};
use janus_var::SeriesForecast;

use crate::cli::ForecastArgs;
use crate::config::JanusConfig;
use crate::convert;

/// Verdicts on the residuals of one equation.
#[derive(Debug, Serialize)]
pub struct EquationDiagnostics {
    pub durbin_watson: Option<f64>,
    pub no_autocorrelation: Option<bool>,
    pub shapiro_p_value: Option<f64>,
    pub residuals_normal: Option<bool>,
    pub white_p_value: Option<f64>,
    pub homoscedastic: Option<bool>,
}

/// Everything the forecast command reports, as written by `--json`.
#[derive(Debug, Serialize)]
pub struct ForecastView {
    pub series: String,
    pub lag_order: usize,
    pub alpha: f64,
    pub years: Vec<i32>,
    pub growth: SeriesForecast,
    pub levels: LevelInterval,
    pub diagnostics: EquationDiagnostics,
}

/// Builds the forecast view for `series` from a loaded bundle.
pub fn build_view(
    bundle: &ModelBundle,
    series: &str,
    horizon: usize,
    alpha: f64,
) -> Result<ForecastView> {
    let fit = &bundle.model_fit;
    let result = fit
        .forecast(bundle.history_tail(), horizon, alpha)
        .context("forecast failed")?;
    let growth = result
        .series(series)
        .ok_or_else(|| anyhow!("series {series:?} is not part of the model"))?;

    let last_year = bundle
        .last_year()
        .ok_or_else(|| anyhow!("bundle growth panel is empty"))?;
    let anchor = bundle
        .anchor_level(series)
        .ok_or_else(|| anyhow!("no {series:?} level observed in {last_year}"))?;
    let levels = reconstruct_interval(&growth.point, &growth.lower, &growth.upper, anchor);

    let report = &bundle.diagnostics;
    let white_p_value = report.white_test.as_ref().map(|w| w.p_value);
    let diagnostics = EquationDiagnostics {
        durbin_watson: report.durbin_watson.get(series).copied(),
        no_autocorrelation: report.no_autocorrelation(series),
        shapiro_p_value: report.shapiro_wilk.get(series).map(|s| s.p_value),
        residuals_normal: report.residuals_normal(series),
        white_p_value,
        homoscedastic: report.homoscedastic(),
    };

    Ok(ForecastView {
        series: series.to_string(),
        lag_order: fit.lag_order(),
        alpha,
        years: convert::forecast_years(last_year, horizon),
        growth,
        levels,
        diagnostics,
    })
}

/// Reads the bundle once; a single forecast run has nothing to memoize.
fn load_bundle(path: &Path) -> Result<ModelBundle> {
    let bundle = read_bundle(path)
        .with_context(|| format!("failed to load bundle: {}", path.display()))?;
    info!(path = %path.display(), p = bundle.model_fit.lag_order(), "bundle loaded");
    Ok(bundle)
}

/// Run the forecast pipeline.
pub fn run(args: ForecastArgs, config: JanusConfig) -> Result<()> {
    let _cmd = info_span!("forecast").entered();

    let bundle_path = args.bundle.unwrap_or(config.io.bundle);
    let horizon = args.horizon.unwrap_or(config.forecast.horizon);
    let alpha = args.alpha.unwrap_or(config.forecast.alpha);
    let series = config.model.gdp_series;

    // 1. A missing bundle is not an error for the serving side
    if !bundle_path.exists() {
        println!(
            "No model bundle found at {}. Run `janus train` first.",
            bundle_path.display()
        );
        return Ok(());
    }

    // 2. Load
    let bundle = load_bundle(&bundle_path)?;

    // 3. Forecast and reconstruct
    let view = build_view(&bundle, &series, horizon, alpha)?;
    print_view(&view);

    // 4. Optional JSON
    if let Some(path) = args.json {
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &view)
            .context("failed to serialise forecast")?;
        info!(path = %path.display(), "forecast written");
    }

    Ok(())
}

fn verdict(v: Option<bool>, yes: &str, no: &str) -> String {
    match v {
        Some(true) => yes.to_string(),
        Some(false) => no.to_string(),
        None => "could not be computed".to_string(),
    }
}

fn print_view(view: &ForecastView) {
    let level = (1.0 - view.alpha) * 100.0;
    println!(
        "{} forecast, VAR({}) on growth rates, {level:.0}% intervals",
        view.series, view.lag_order
    );
    println!(
        "{:>6} {:>9} {:>9} {:>9} {:>14} {:>14} {:>14}",
        "year", "growth %", "lower", "upper", "level", "level lower", "level upper"
    );
    for (i, year) in view.years.iter().enumerate() {
        println!(
            "{year:>6} {:>9.2} {:>9.2} {:>9.2} {:>14.2} {:>14.2} {:>14.2}",
            view.growth.point[i],
            view.growth.lower[i],
            view.growth.upper[i],
            view.levels.point[i],
            view.levels.lower[i],
            view.levels.upper[i],
        );
    }

    let d = &view.diagnostics;
    println!();
    println!("Diagnostics for the {} equation:", view.series);
    match d.durbin_watson {
        Some(dw) => println!(
            "  Durbin-Watson {dw:.3}: {}",
            verdict(
                d.no_autocorrelation,
                "no strong autocorrelation",
                "autocorrelation flagged"
            )
        ),
        None => println!("  Durbin-Watson: could not be computed"),
    }
    match d.shapiro_p_value {
        Some(p) => println!(
            "  Shapiro-Wilk p = {p:.4}: {}",
            verdict(d.residuals_normal, "normality not rejected", "normality rejected")
        ),
        None => println!("  Shapiro-Wilk: could not be computed"),
    }
    match d.white_p_value {
        Some(p) => println!(
            "  White p = {p:.4}: {}",
            verdict(
                d.homoscedastic,
                "homoscedasticity not rejected",
                "heteroscedasticity detected"
            )
        ),
        None => println!("  White: could not be computed"),
    }
}
