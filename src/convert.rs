//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use janus_io::ReaderConfig;
use janus_var::InfoCriterion;

use crate::config::IoConfig;

/// Parses a single-character field delimiter.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => bail!("delimiter must be a single ASCII character, got {s:?}"),
    }
}

/// Parses an information criterion name.
pub fn parse_criterion(s: &str) -> Result<InfoCriterion> {
    s.parse::<InfoCriterion>()
        .with_context(|| format!("invalid [model].criterion {s:?}"))
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoConfig) -> Result<ReaderConfig> {
    Ok(ReaderConfig::default()
        .with_delimiter(parse_delimiter(&io.delimiter)?)
        .with_decimal_comma(io.decimal_comma))
}

/// Years following `last_year`, one per forecast step.
pub fn forecast_years(last_year: i32, horizon: usize) -> Vec<i32> {
    (1..=horizon as i32).map(|h| last_year + h).collect()
}
