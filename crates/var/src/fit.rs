//! Fitted VAR model results.

use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::criterion::InfoCriterion;
use crate::spec::VarSpec;

/// A fitted VAR(p) model produced by [`VarSpec::fit()`] or
/// [`crate::select_order()`].
///
/// Immutable once built. Holds the intercepts, the `p` coefficient matrices,
/// both residual covariances, the residuals and the design matrix they were
/// computed from.
///
/// # Typestate Workflow
///
/// ```mermaid
/// graph LR
///     B["VarFit"] --> C[".coefs() / .intercept()"]
///     B --> D[".residuals() / .exog()"]
///     B --> E[".aic()"]
///     B --> F[".forecast(&tail, h, alpha)"]
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VarFit {
    spec: VarSpec,
    names: Vec<String>,
    intercept: Vec<f64>,
    coefs: Vec<Array2<f64>>,
    sigma_u: Array2<f64>,
    sigma_u_mle: Array2<f64>,
    residuals: Array2<f64>,
    exog: Array2<f64>,
    log_likelihood: f64,
    log_det_sigma_mle: f64,
    n_train: usize,
}

impl VarFit {
    /// Creates a new `VarFit` (crate-internal constructor).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        spec: VarSpec,
        names: Vec<String>,
        intercept: Vec<f64>,
        coefs: Vec<Array2<f64>>,
        sigma_u: Array2<f64>,
        sigma_u_mle: Array2<f64>,
        residuals: Array2<f64>,
        exog: Array2<f64>,
        log_likelihood: f64,
        log_det_sigma_mle: f64,
        n_train: usize,
    ) -> Self {
        Self {
            spec,
            names,
            intercept,
            coefs,
            sigma_u,
            sigma_u_mle,
            residuals,
            exog,
            log_likelihood,
            log_det_sigma_mle,
            n_train,
        }
    }

    /// Returns the [`VarSpec`] that produced this fit.
    pub fn spec(&self) -> VarSpec {
        self.spec
    }

    /// Returns the lag order `p`.
    pub fn lag_order(&self) -> usize {
        self.spec.p()
    }

    /// Series names, in equation order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of series `k`.
    pub fn n_series(&self) -> usize {
        self.names.len()
    }

    /// Equation intercepts (length `k`).
    pub fn intercept(&self) -> &[f64] {
        &self.intercept
    }

    /// Lag coefficient matrices `A_1..A_p`, each `k x k`; entry `(i, j)` is
    /// the weight of series `j` in the equation of series `i`.
    pub fn coefs(&self) -> &[Array2<f64>] {
        &self.coefs
    }

    /// Residual covariance with degrees-of-freedom correction,
    /// `E'E / (T - kp - 1)`. Drives the forecast intervals.
    pub fn sigma_u(&self) -> ArrayView2<'_, f64> {
        self.sigma_u.view()
    }

    /// Maximum-likelihood residual covariance `E'E / T`.
    pub fn sigma_u_mle(&self) -> ArrayView2<'_, f64> {
        self.sigma_u_mle.view()
    }

    /// Residuals, `T x k`.
    pub fn residuals(&self) -> ArrayView2<'_, f64> {
        self.residuals.view()
    }

    /// Residuals of one equation.
    pub fn residual_series(&self, name: &str) -> Option<Vec<f64>> {
        let j = self.names.iter().position(|n| n == name)?;
        Some(self.residuals.column(j).to_vec())
    }

    /// Design matrix the model was estimated on, `T x (1 + kp)`: a constant
    /// column followed by the lag-1 values of every series, then lag 2, and
    /// so on.
    pub fn exog(&self) -> ArrayView2<'_, f64> {
        self.exog.view()
    }

    /// Effective sample size `T`.
    pub fn nobs(&self) -> usize {
        self.residuals.nrows()
    }

    /// Rows of the training panel, presample included.
    pub fn n_train(&self) -> usize {
        self.n_train
    }

    /// Number of estimated mean parameters, intercepts included: `k(kp + 1)`.
    pub fn n_params(&self) -> usize {
        let k = self.n_series();
        k * (k * self.lag_order() + 1)
    }

    /// Gaussian log-likelihood at the estimates.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// `-2 logL / T`.
    fn scaled_deviance(&self) -> f64 {
        -2.0 * self.log_likelihood / self.nobs() as f64
    }

    /// Akaike Information Criterion, `-2 logL / T + 2K / T`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let fit = VarSpec::new(1).fit(&growth)?;
    /// println!("AIC = {}", fit.aic());
    /// ```
    pub fn aic(&self) -> f64 {
        let t = self.nobs() as f64;
        self.scaled_deviance() + 2.0 * self.n_params() as f64 / t
    }

    /// Schwarz criterion, `-2 logL / T + K ln T / T`.
    pub fn bic(&self) -> f64 {
        let t = self.nobs() as f64;
        self.scaled_deviance() + self.n_params() as f64 * t.ln() / t
    }

    /// Hannan-Quinn criterion, `-2 logL / T + 2K ln ln T / T`.
    pub fn hqic(&self) -> f64 {
        let t = self.nobs() as f64;
        self.scaled_deviance() + 2.0 * self.n_params() as f64 * t.ln().ln() / t
    }

    /// Final prediction error, `((T + m) / (T - m))^k |Sigma_mle|` with
    /// `m = kp + 1`.
    pub fn fpe(&self) -> f64 {
        let t = self.nobs() as f64;
        let k = self.n_series();
        let m = (k * self.lag_order() + 1) as f64;
        ((t + m) / (t - m)).powi(k as i32) * self.log_det_sigma_mle.exp()
    }

    /// Value of the requested criterion.
    pub fn information_criterion(&self, criterion: InfoCriterion) -> f64 {
        match criterion {
            InfoCriterion::Aic => self.aic(),
            InfoCriterion::Bic => self.bic(),
            InfoCriterion::Hqic => self.hqic(),
            InfoCriterion::Fpe => self.fpe(),
        }
    }

    /// Companion matrix of the lag polynomial, `kp x kp`.
    pub fn companion(&self) -> Array2<f64> {
        let k = self.n_series();
        let p = self.lag_order();
        let mut c = Array2::zeros((k * p, k * p));
        for (lag, a) in self.coefs.iter().enumerate() {
            for i in 0..k {
                for j in 0..k {
                    c[[i, lag * k + j]] = a[[i, j]];
                }
            }
        }
        for i in k..k * p {
            c[[i, i - k]] = 1.0;
        }
        c
    }

    /// Returns `true` if every eigenvalue of the companion matrix lies
    /// strictly inside the unit circle.
    pub fn is_stable(&self) -> bool {
        let c = self.companion();
        let n = c.nrows();
        let m = DMatrix::from_fn(n, n, |i, j| c[[i, j]]);
        m.complex_eigenvalues().iter().all(|z| z.norm() < 1.0)
    }
}
