use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Config file looked up in the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG: &str = "janus.toml";

/// Top-level Janus configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JanusConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Model selection settings.
    #[serde(default)]
    pub model: ModelToml,

    /// Forecast settings.
    #[serde(default)]
    pub forecast: ForecastToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default = "default_bundle")]
    pub bundle: PathBuf,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_true")]
    pub decimal_comma: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            bundle: default_bundle(),
            delimiter: default_delimiter(),
            decimal_comma: true,
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("donnees_benin.csv")
}
fn default_bundle() -> PathBuf {
    PathBuf::from("growth_model_bundle.json")
}
fn default_delimiter() -> String {
    ";".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    #[serde(default = "default_series")]
    pub series: Vec<String>,
    #[serde(default = "default_gdp_series")]
    pub gdp_series: String,
    #[serde(default = "default_max_lag")]
    pub max_lag: usize,
    #[serde(default = "default_criterion")]
    pub criterion: String,
}

impl Default for ModelToml {
    fn default() -> Self {
        Self {
            series: default_series(),
            gdp_series: default_gdp_series(),
            max_lag: default_max_lag(),
            criterion: default_criterion(),
        }
    }
}

fn default_series() -> Vec<String> {
    vec![
        "PIB".to_string(),
        "Investissement".to_string(),
        "Balance commerciale".to_string(),
    ]
}
fn default_gdp_series() -> String {
    "PIB".to_string()
}
fn default_max_lag() -> usize {
    3
}
fn default_criterion() -> String {
    "aic".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            alpha: default_alpha(),
        }
    }
}

fn default_horizon() -> usize {
    5
}
fn default_alpha() -> f64 {
    0.05
}

/// Loads the configuration.
///
/// An explicit `path` must exist. Without one, `janus.toml` in the working
/// directory is used if present and built-in defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<JanusConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG);
            if !fallback.exists() {
                debug!("no config file, using defaults");
                return Ok(JanusConfig::default());
            }
            fallback
        }
    };

    let toml_str = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    parse(&toml_str).with_context(|| format!("failed to parse TOML config: {}", path.display()))
}

fn parse(toml_str: &str) -> Result<JanusConfig> {
    Ok(toml::from_str(toml_str)?)
}
