//! Percent growth rates and the finite-only growth panel.

use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::PanelError;
use crate::panel::TimeSeriesPanel;

/// Percent change between consecutive elements.
///
/// Returns `levels.len() - 1` values (empty for fewer than two levels). A
/// rate that is infinite or undefined, e.g. after a zero level, is returned
/// as `NaN`.
///
/// # Example
///
/// ```
/// use janus_panel::percent_change;
///
/// let g = percent_change(&[100.0, 110.0, 99.0]);
/// assert_eq!(g.len(), 2);
/// assert!((g[0] - 10.0).abs() < 1e-12);
/// assert!((g[1] + 10.0).abs() < 1e-12);
/// ```
pub fn percent_change(levels: &[f64]) -> Vec<f64> {
    levels
        .windows(2)
        .map(|w| {
            let g = (w[1] - w[0]) / w[0] * 100.0;
            if g.is_finite() { g } else { f64::NAN }
        })
        .collect()
}

/// A panel of percent growth rates containing finite values only.
///
/// Produced by [`TimeSeriesPanel::growth_rates()`]; this is the training
/// sample of the VAR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TimeSeriesPanel", try_from = "TimeSeriesPanel")]
pub struct GrowthPanel {
    panel: TimeSeriesPanel,
}

impl GrowthPanel {
    /// Wraps a panel whose values are already growth rates.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::NonFiniteData`] if any value is NaN or infinite.
    pub fn new(panel: TimeSeriesPanel) -> Result<Self, PanelError> {
        if !panel.is_complete() {
            return Err(PanelError::NonFiniteData);
        }
        Ok(Self { panel })
    }

    /// Borrow the underlying panel.
    pub fn as_panel(&self) -> &TimeSeriesPanel {
        &self.panel
    }

    pub fn years(&self) -> &[i32] {
        self.panel.years()
    }

    pub fn names(&self) -> &[String] {
        self.panel.names()
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.panel.values()
    }

    pub fn n_rows(&self) -> usize {
        self.panel.n_rows()
    }

    pub fn n_series(&self) -> usize {
        self.panel.n_series()
    }

    /// The last `n` rows, oldest first. Used as the forecast seed window.
    pub fn tail(&self, n: usize) -> ArrayView2<'_, f64> {
        self.panel.tail(n)
    }

    /// Growth rates of one series.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let j = self.panel.column_index(name)?;
        Some(self.values().index_axis(Axis(1), j).to_vec())
    }
}

impl From<GrowthPanel> for TimeSeriesPanel {
    fn from(growth: GrowthPanel) -> Self {
        growth.panel
    }
}

impl TryFrom<TimeSeriesPanel> for GrowthPanel {
    type Error = PanelError;

    fn try_from(panel: TimeSeriesPanel) -> Result<Self, Self::Error> {
        Self::new(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn percent_change_length() {
        assert!(percent_change(&[]).is_empty());
        assert!(percent_change(&[5.0]).is_empty());
        assert_eq!(percent_change(&[1.0, 2.0, 3.0, 4.0]).len(), 3);
    }

    #[test]
    fn percent_change_values() {
        let g = percent_change(&[200.0, 210.0, 189.0]);
        assert_relative_eq!(g[0], 5.0, epsilon = 1e-12);
        assert_relative_eq!(g[1], -10.0, epsilon = 1e-12);
    }

    #[test]
    fn percent_change_zero_prior_level_is_missing() {
        let g = percent_change(&[0.0, 5.0, 0.0, 0.0]);
        assert!(g[0].is_nan()); // +inf
        assert_relative_eq!(g[1], -100.0, epsilon = 1e-12);
        assert!(g[2].is_nan()); // 0/0
    }

    #[test]
    fn percent_change_negative_levels() {
        // Trade balances can be negative; the rate follows the raw formula.
        let g = percent_change(&[-4.0, -3.0]);
        assert_relative_eq!(g[0], -25.0, epsilon = 1e-12);
    }

    #[test]
    fn new_rejects_non_finite() {
        let panel = TimeSeriesPanel::from_columns(
            vec![1, 2],
            vec![("a".into(), vec![1.0, f64::NAN])],
        )
        .unwrap();
        assert_eq!(GrowthPanel::new(panel).unwrap_err(), PanelError::NonFiniteData);
    }

    #[test]
    fn column_and_tail() {
        let panel = TimeSeriesPanel::from_columns(
            vec![1, 2, 3],
            vec![
                ("a".into(), vec![1.0, 2.0, 3.0]),
                ("b".into(), vec![4.0, 5.0, 6.0]),
            ],
        )
        .unwrap();
        let g = GrowthPanel::new(panel).unwrap();
        assert_eq!(g.column("b"), Some(vec![4.0, 5.0, 6.0]));
        assert!(g.column("c").is_none());
        let tail = g.tail(2);
        assert_eq!(tail.nrows(), 2);
        assert_eq!(tail[[0, 0]], 2.0);
    }
}
