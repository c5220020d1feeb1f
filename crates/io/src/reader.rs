//! Semicolon-separated level data with decimal commas.

use std::fs::File;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};
use janus_panel::TimeSeriesPanel;
use tracing::{debug, info};

use crate::error::IoError;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a level panel from CSV.
///
/// The [`Default`] implementation matches national-accounts exports: `;` as
/// field separator, `,` as decimal mark, every column after the year kept.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Field separator.
    delimiter: u8,
    /// Whether `,` is the decimal mark.
    decimal_comma: bool,
    /// Series to keep, in order; `None` keeps every column.
    columns: Option<Vec<String>>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            decimal_comma: true,
            columns: None,
        }
    }
}

impl ReaderConfig {
    /// Set the field separator.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Treat `,` as the decimal mark (or not).
    pub fn with_decimal_comma(mut self, decimal_comma: bool) -> Self {
        self.decimal_comma = decimal_comma;
        self
    }

    /// Keep only these series, in this order.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn decimal_comma(&self) -> bool {
        self.decimal_comma
    }

    /// Parses one numeric cell; empty or unparsable cells become `NaN`.
    fn parse_value(&self, raw: &str) -> f64 {
        let cell = raw.trim();
        if cell.is_empty() {
            return f64::NAN;
        }
        let parsed = if self.decimal_comma {
            cell.replace(',', ".").parse::<f64>()
        } else {
            cell.parse::<f64>()
        };
        parsed.unwrap_or(f64::NAN)
    }
}

/// UTF-8 if valid, otherwise Latin-1 (every byte maps to the code point of
/// the same value).
fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn decode_record(record: &ByteRecord) -> Vec<String> {
    record.iter().map(|f| decode(f).trim().to_string()).collect()
}

// ---------------------------------------------------------------------------
// read_csv
// ---------------------------------------------------------------------------

/// Read a year-indexed level panel from a CSV file.
///
/// The first column is the year (e.g. `Année`); every other header names a
/// series. Header names are trimmed. Unparsable numeric cells are stored as
/// `NaN` rather than rejected.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::Csv`] | malformed CSV or a row with the wrong number of fields |
/// | [`IoError::InvalidYear`] | a year cell is not an integer |
/// | [`IoError::MissingColumn`] | a configured series is absent from the header |
/// | [`IoError::Panel`] | no series, duplicate names or unsorted years |
///
/// # Example
///
/// ```ignore
/// let config = ReaderConfig::default().with_columns(["PIB", "Investissement"]);
/// let levels = read_csv(Path::new("donnees_benin.csv"), &config)?;
/// ```
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_csv(path: &Path, config: &ReaderConfig) -> Result<TimeSeriesPanel, IoError> {
    let file = File::open(path).map_err(|e| IoError::from_io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .trim(Trim::All)
        .has_headers(true)
        .from_reader(file);

    let header = decode_record(reader.byte_headers()?);
    let available: Vec<&str> = header.iter().skip(1).map(String::as_str).collect();

    // Column positions (in the record) of the series to keep.
    let selected: Vec<(usize, String)> = match &config.columns {
        Some(wanted) => wanted
            .iter()
            .map(|name| {
                available
                    .iter()
                    .position(|h| *h == name.as_str())
                    .map(|j| (j + 1, name.clone()))
                    .ok_or_else(|| IoError::MissingColumn {
                        name: name.clone(),
                        path: path.to_path_buf(),
                    })
            })
            .collect::<Result<_, _>>()?,
        None => available
            .iter()
            .enumerate()
            .map(|(j, h)| (j + 1, h.to_string()))
            .collect(),
    };

    let mut years = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); selected.len()];
    let mut n_missing = 0usize;

    for result in reader.byte_records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let fields = decode_record(&record);

        let raw_year = fields.first().map(String::as_str).unwrap_or_default();
        let year = raw_year
            .parse::<i32>()
            .map_err(|_| IoError::InvalidYear {
                value: raw_year.to_string(),
                line,
            })?;
        years.push(year);

        for (col, (idx, _)) in columns.iter_mut().zip(&selected) {
            let value = config.parse_value(&fields[*idx]);
            if value.is_nan() {
                n_missing += 1;
            }
            col.push(value);
        }
    }

    if n_missing > 0 {
        debug!(n_missing, "unparsable cells stored as NaN");
    }
    info!(rows = years.len(), series = selected.len(), "loaded level panel");

    let named = selected
        .into_iter()
        .map(|(_, name)| name)
        .zip(columns)
        .collect();
    Ok(TimeSeriesPanel::from_columns(years, named)?)
}
