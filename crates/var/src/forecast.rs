//! Multi-step point forecasts and analytic forecast intervals.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::VarError;
use crate::fit::VarFit;

/// Point forecasts with lower and upper bounds, `horizon x k` each.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    names: Vec<String>,
    alpha: f64,
    point: Array2<f64>,
    lower: Array2<f64>,
    upper: Array2<f64>,
}

/// Forecast path of a single series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesForecast {
    pub point: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl ForecastResult {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Significance level; bounds cover `1 - alpha`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn horizon(&self) -> usize {
        self.point.nrows()
    }

    pub fn point(&self) -> ArrayView2<'_, f64> {
        self.point.view()
    }

    pub fn lower(&self) -> ArrayView2<'_, f64> {
        self.lower.view()
    }

    pub fn upper(&self) -> ArrayView2<'_, f64> {
        self.upper.view()
    }

    /// Upper minus lower bound per step for one series.
    pub fn widths(&self, name: &str) -> Option<Vec<f64>> {
        let j = self.names.iter().position(|n| n == name)?;
        Some(
            self.upper
                .column(j)
                .iter()
                .zip(self.lower.column(j))
                .map(|(u, l)| u - l)
                .collect(),
        )
    }

    /// Point and bound paths for the series called `name`.
    pub fn series(&self, name: &str) -> Option<SeriesForecast> {
        let j = self.names.iter().position(|n| n == name)?;
        Some(SeriesForecast {
            point: self.point.index_axis(Axis(1), j).to_vec(),
            lower: self.lower.index_axis(Axis(1), j).to_vec(),
            upper: self.upper.index_axis(Axis(1), j).to_vec(),
        })
    }
}

impl VarFit {
    fn check_history(&self, history_tail: &ArrayView2<'_, f64>) -> Result<(), VarError> {
        let (rows, cols) = history_tail.dim();
        if rows != self.lag_order() {
            return Err(VarError::InsufficientHistory {
                expected: self.lag_order(),
                got: rows,
            });
        }
        if cols != self.n_series() {
            return Err(VarError::SeriesMismatch {
                expected: self.n_series(),
                got: cols,
            });
        }
        if history_tail.iter().any(|x| !x.is_finite()) {
            return Err(VarError::NonFiniteData);
        }
        Ok(())
    }

    /// Iterated point forecasts, `horizon x k`.
    ///
    /// `history_tail` holds the last `p` observations, oldest first. Each
    /// forecast is fed back as the most recent lag of the next step; the
    /// model is never re-estimated.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`VarError::InsufficientHistory`] | `history_tail` does not have exactly `p` rows |
    /// | [`VarError::SeriesMismatch`] | `history_tail` does not have `k` columns |
    /// | [`VarError::NonFiniteData`] | `history_tail` holds NaN or infinity |
    pub fn forecast_point(
        &self,
        history_tail: ArrayView2<'_, f64>,
        horizon: usize,
    ) -> Result<Array2<f64>, VarError> {
        self.check_history(&history_tail)?;
        let p = self.lag_order();
        let k = self.n_series();

        let mut window: Vec<Array1<f64>> = history_tail.outer_iter().map(|r| r.to_owned()).collect();
        let mut out = Array2::zeros((horizon, k));
        let intercept = Array1::from(self.intercept().to_vec());

        for step in 0..horizon {
            let mut next = intercept.clone();
            for lag in 1..=p {
                let lagged = &window[window.len() - lag];
                next += &self.coefs()[lag - 1].dot(lagged);
            }
            out.row_mut(step).assign(&next);
            window.push(next);
        }

        Ok(out)
    }

    /// Moving-average weights `Phi_0..Phi_{n-1}`, with `Phi_0 = I` and
    /// `Phi_i = sum_{j=1}^{min(i,p)} Phi_{i-j} A_j`.
    pub fn ma_coefficients(&self, n: usize) -> Vec<Array2<f64>> {
        let k = self.n_series();
        let p = self.lag_order();
        let mut phis: Vec<Array2<f64>> = Vec::with_capacity(n);
        for i in 0..n {
            if i == 0 {
                phis.push(Array2::eye(k));
                continue;
            }
            let mut phi = Array2::zeros((k, k));
            for j in 1..=i.min(p) {
                phi += &phis[i - j].dot(&self.coefs()[j - 1]);
            }
            phis.push(phi);
        }
        phis
    }

    /// Forecast mean-squared-error matrices for steps `1..=horizon`:
    /// `Sigma(h) = sum_{i<h} Phi_i Sigma_u Phi_i'`.
    pub fn forecast_mse(&self, horizon: usize) -> Vec<Array2<f64>> {
        let k = self.n_series();
        let sigma = self.sigma_u();
        let mut acc = Array2::<f64>::zeros((k, k));
        self.ma_coefficients(horizon)
            .iter()
            .map(|phi| {
                acc += &phi.dot(&sigma).dot(&phi.t());
                acc.clone()
            })
            .collect()
    }

    /// Point forecasts with `1 - alpha` normal intervals.
    ///
    /// Bounds are `point +/- z_{1-alpha/2} * sqrt(diag Sigma(h))`; because
    /// `Sigma(h)` only accumulates positive semi-definite terms, interval
    /// widths never shrink with the horizon.
    ///
    /// # Errors
    ///
    /// As [`VarFit::forecast_point()`], plus [`VarError::InvalidAlpha`] when
    /// `alpha` is outside `(0, 1)`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let p = fit.lag_order();
    /// let result = fit.forecast(growth.tail(p), 5, 0.05)?;
    /// let gdp = result.series("PIB").unwrap();
    /// ```
    pub fn forecast(
        &self,
        history_tail: ArrayView2<'_, f64>,
        horizon: usize,
        alpha: f64,
    ) -> Result<ForecastResult, VarError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(VarError::InvalidAlpha { alpha });
        }
        let point = self.forecast_point(history_tail, horizon)?;

        let normal = Normal::standard();
        let z = normal.inverse_cdf(1.0 - alpha / 2.0);

        let k = self.n_series();
        let mut lower = point.clone();
        let mut upper = point.clone();
        for (step, mse) in self.forecast_mse(horizon).iter().enumerate() {
            for j in 0..k {
                let half = z * mse[[j, j]].abs().sqrt();
                lower[[step, j]] -= half;
                upper[[step, j]] += half;
            }
        }

        Ok(ForecastResult {
            names: self.names().to_vec(),
            alpha,
            point,
            lower,
            upper,
        })
    }
}
