//! Year-indexed multivariate level panel.

use std::collections::BTreeSet;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis, s};
use serde::{Deserialize, Serialize};

use crate::error::PanelError;
use crate::growth::{GrowthPanel, percent_change};

/// A table of named numeric series indexed by strictly increasing years.
///
/// Values are stored row-major in an `(n_years, n_series)` matrix. A panel
/// read from disk may still contain `NaN` for unparsable cells; call
/// [`TimeSeriesPanel::complete_cases()`] before modelling.
///
/// Serialises column-wise with missing values as `null`, so a panel holding
/// `NaN` survives a JSON round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "PanelRepr", try_from = "PanelRepr")]
pub struct TimeSeriesPanel {
    years: Vec<i32>,
    names: Vec<String>,
    values: Array2<f64>,
}

impl TimeSeriesPanel {
    /// Creates a panel from years, series names and an `(n_years, n_series)`
    /// value matrix.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`PanelError::NoSeries`] | `names` is empty |
    /// | [`PanelError::InvalidSeriesName`] | blank or duplicated name |
    /// | [`PanelError::ShapeMismatch`] | matrix shape differs from `(years, names)` |
    /// | [`PanelError::YearsNotIncreasing`] | years not strictly increasing |
    pub fn new(years: Vec<i32>, names: Vec<String>, values: Array2<f64>) -> Result<Self, PanelError> {
        if names.is_empty() {
            return Err(PanelError::NoSeries);
        }

        let mut seen = BTreeSet::new();
        for name in &names {
            if name.trim().is_empty() || !seen.insert(name.as_str()) {
                return Err(PanelError::InvalidSeriesName { name: name.clone() });
            }
        }

        let (rows, cols) = values.dim();
        if rows != years.len() || cols != names.len() {
            return Err(PanelError::ShapeMismatch {
                expected_rows: years.len(),
                expected_cols: names.len(),
                rows,
                cols,
            });
        }

        if let Some(w) = years.windows(2).find(|w| w[1] <= w[0]) {
            return Err(PanelError::YearsNotIncreasing {
                previous: w[0],
                next: w[1],
            });
        }

        Ok(Self {
            years,
            names,
            values,
        })
    }

    /// Creates a panel from `(name, values)` columns of equal length.
    ///
    /// # Errors
    ///
    /// Same as [`TimeSeriesPanel::new()`]; a column of the wrong length is a
    /// [`PanelError::ShapeMismatch`].
    pub fn from_columns(years: Vec<i32>, columns: Vec<(String, Vec<f64>)>) -> Result<Self, PanelError> {
        let n_rows = years.len();
        let n_cols = columns.len();
        let mut values = Array2::from_elem((n_rows, n_cols), f64::NAN);
        let mut names = Vec::with_capacity(n_cols);

        for (j, (name, col)) in columns.into_iter().enumerate() {
            if col.len() != n_rows {
                return Err(PanelError::ShapeMismatch {
                    expected_rows: n_rows,
                    expected_cols: n_cols,
                    rows: col.len(),
                    cols: n_cols,
                });
            }
            for (i, v) in col.into_iter().enumerate() {
                values[[i, j]] = v;
            }
            names.push(name);
        }

        Self::new(years, names, values)
    }

    /// Returns the year index.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Returns the series names, in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the `(n_years, n_series)` value matrix.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Number of rows (years).
    pub fn n_rows(&self) -> usize {
        self.years.len()
    }

    /// Number of series (columns).
    pub fn n_series(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the panel has no rows.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Position of the series called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Values of the series called `name`.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.column_index(name).map(|j| self.values.column(j))
    }

    /// Last year of the panel.
    pub fn last_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// Last value of the series called `name`.
    pub fn last_value(&self, name: &str) -> Option<f64> {
        let j = self.column_index(name)?;
        let i = self.n_rows().checked_sub(1)?;
        Some(self.values[[i, j]])
    }

    /// Value of `name` in `year`, if both exist.
    pub fn value_at(&self, year: i32, name: &str) -> Option<f64> {
        let j = self.column_index(name)?;
        let i = self.years.binary_search(&year).ok()?;
        Some(self.values[[i, j]])
    }

    /// The last `n` rows (all rows if the panel is shorter).
    pub fn tail(&self, n: usize) -> ArrayView2<'_, f64> {
        let start = self.n_rows().saturating_sub(n);
        self.values.slice(s![start.., ..])
    }

    /// Returns `true` if every value is finite.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Builds a new panel holding only `names`, in the requested order.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::UnknownSeries`] for a name not in the panel and
    /// [`PanelError::NoSeries`] when `names` is empty.
    pub fn select(&self, names: &[&str]) -> Result<Self, PanelError> {
        let indices = names
            .iter()
            .map(|&name| {
                self.column_index(name).ok_or_else(|| PanelError::UnknownSeries {
                    name: name.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(
            self.years.clone(),
            names.iter().map(|n| n.to_string()).collect(),
            self.values.select(Axis(1), &indices),
        )
    }

    /// Drops every row that holds a non-finite value in any column.
    pub fn complete_cases(&self) -> Self {
        let keep: Vec<usize> = self
            .values
            .outer_iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(|v| v.is_finite()))
            .map(|(i, _)| i)
            .collect();

        Self {
            years: keep.iter().map(|&i| self.years[i]).collect(),
            names: self.names.clone(),
            values: self.values.select(Axis(0), &keep),
        }
    }

    /// Converts levels into percent growth rates.
    ///
    /// Each column becomes `(x[t] - x[t-1]) / x[t-1] * 100`; the first row is
    /// dropped and every growth row keeps the year of its later observation.
    /// Infinite or undefined rates (zero or missing prior level) are treated
    /// as missing, and any row holding a missing rate is dropped across all
    /// columns.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::InsufficientData`] if fewer than `max_lag + 2`
    /// rows remain.
    pub fn growth_rates(&self, max_lag: usize) -> Result<GrowthPanel, PanelError> {
        let n_growth = self.n_rows().saturating_sub(1);
        let mut rates = Array2::from_elem((n_growth, self.n_series()), f64::NAN);
        for (j, col) in self.values.columns().into_iter().enumerate() {
            let levels: Vec<f64> = col.to_vec();
            for (i, g) in percent_change(&levels).into_iter().enumerate() {
                rates[[i, j]] = g;
            }
        }

        let years = self.years.iter().skip(1).copied().collect();
        let raw = Self {
            years,
            names: self.names.clone(),
            values: rates,
        };
        let clean = raw.complete_cases();

        let dropped = n_growth - clean.n_rows();
        if dropped > 0 {
            tracing::debug!(dropped, "dropped growth rows with missing values");
        }

        let min = max_lag + 2;
        if clean.n_rows() < min {
            return Err(PanelError::InsufficientData {
                n: clean.n_rows(),
                min,
            });
        }

        GrowthPanel::new(clean)
    }
}

/// Column-wise wire representation; missing values are `None`.
#[derive(Serialize, Deserialize)]
struct PanelRepr {
    years: Vec<i32>,
    names: Vec<String>,
    columns: Vec<Vec<Option<f64>>>,
}

impl From<TimeSeriesPanel> for PanelRepr {
    fn from(panel: TimeSeriesPanel) -> Self {
        let columns = panel
            .values
            .columns()
            .into_iter()
            .map(|col| col.iter().map(|&v| v.is_finite().then_some(v)).collect())
            .collect();
        Self {
            years: panel.years,
            names: panel.names,
            columns,
        }
    }
}

impl TryFrom<PanelRepr> for TimeSeriesPanel {
    type Error = PanelError;

    fn try_from(repr: PanelRepr) -> Result<Self, Self::Error> {
        let columns = repr
            .names
            .into_iter()
            .zip(repr.columns)
            .map(|(name, col)| (name, col.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()))
            .collect();
        Self::from_columns(repr.years, columns)
    }
}
