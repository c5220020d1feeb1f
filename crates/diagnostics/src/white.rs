//! White's heteroscedasticity test, joint across a system of equations.

use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::error::DiagnosticsError;

/// Result of White's test.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WhiteTest {
    /// LM statistic.
    pub statistic: f64,
    /// Degrees of freedom of the chi-squared reference distribution.
    pub df: usize,
    pub p_value: f64,
}

impl WhiteTest {
    /// `true` when homoscedasticity is not rejected at the 5% level.
    pub fn is_homoscedastic(&self) -> bool {
        self.p_value > 0.05
    }
}

/// Auxiliary regressors: a constant, every non-constant column of `exog`,
/// then all squares and cross-products of those columns.
pub fn auxiliary_design(exog: ArrayView2<'_, f64>) -> Array2<f64> {
    let vars: Vec<usize> = (0..exog.ncols())
        .filter(|&j| {
            let col = exog.column(j);
            let first = col.first().copied().unwrap_or(0.0);
            col.iter().any(|&v| v != first)
        })
        .collect();

    let t = exog.nrows();
    let c = vars.len();
    let r = 1 + c + c * (c + 1) / 2;
    let mut aux = Array2::zeros((t, r));
    for row in 0..t {
        let x = exog.row(row);
        aux[[row, 0]] = 1.0;
        let mut col = 1;
        for &j in &vars {
            aux[[row, col]] = x[j];
            col += 1;
        }
        for (a, &i) in vars.iter().enumerate() {
            for &j in &vars[a..] {
                aux[[row, col]] = x[i] * x[j];
                col += 1;
            }
        }
    }
    aux
}

/// Distinct residual cross-products `e_i e_j`, `i <= j`, `T x k(k+1)/2`.
fn cross_products(residuals: ArrayView2<'_, f64>) -> Array2<f64> {
    let (t, k) = residuals.dim();
    let q = k * (k + 1) / 2;
    let mut out = Array2::zeros((t, q));
    for row in 0..t {
        let e = residuals.row(row);
        let mut col = 0;
        for i in 0..k {
            for j in i..k {
                out[[row, col]] = e[i] * e[j];
                col += 1;
            }
        }
    }
    out
}

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

/// Residuals of the least-squares regression of `y` on `x`, or `None` if
/// `x` is rank-deficient.
fn ols_residuals(x: &Array2<f64>, y: &Array2<f64>) -> Option<DMatrix<f64>> {
    let (rows, cols) = x.dim();
    let xm = to_dmatrix(x);
    let ym = to_dmatrix(y);
    let svd = xm.clone().svd(true, true);
    let smax = svd.singular_values.iter().cloned().fold(0.0, f64::max);
    let tol = rows.max(cols) as f64 * f64::EPSILON * smax;
    if svd.singular_values.iter().filter(|&&s| s > tol).count() < cols {
        return None;
    }
    let b = svd.solve(&ym, f64::EPSILON).ok()?;
    Some(ym - xm * b)
}

/// White's test on a system's residuals against its regressors.
///
/// With `q = k(k+1)/2` residual cross-products and `r` auxiliary regressors,
/// `LM = T (q - tr(Omega_1 Omega_0^-1))` where `Omega_0` is the covariance of
/// the cross-products and `Omega_1` the covariance of the auxiliary residuals.
/// `LM ~ chi2(q (r - 1))` under homoscedasticity. For a single equation this
/// is the usual `T R^2` form.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`DiagnosticsError::RowMismatch`] | `residuals` and `exog` differ in rows |
/// | [`DiagnosticsError::InsufficientSample`] | `T <= r` |
/// | [`DiagnosticsError::SingularDesign`] | rank-deficient auxiliary design or degenerate cross-products |
pub fn white_test(
    residuals: ArrayView2<'_, f64>,
    exog: ArrayView2<'_, f64>,
) -> Result<WhiteTest, DiagnosticsError> {
    let t = residuals.nrows();
    if exog.nrows() != t {
        return Err(DiagnosticsError::RowMismatch {
            residuals: t,
            regressors: exog.nrows(),
        });
    }

    let aux = auxiliary_design(exog);
    let r = aux.ncols();
    if t <= r {
        return Err(DiagnosticsError::InsufficientSample { n: t, min: r + 1 });
    }

    let u = cross_products(residuals);
    let q = u.ncols();
    let tf = t as f64;

    let centered = match u.mean_axis(Axis(0)) {
        Some(mean) => &u - &mean,
        None => return Err(DiagnosticsError::InsufficientSample { n: t, min: r + 1 }),
    };
    let c = to_dmatrix(&centered);
    let omega0 = c.transpose() * &c / tf;
    let omega0_inv = omega0
        .try_inverse()
        .ok_or(DiagnosticsError::SingularDesign)?;

    let v = ols_residuals(&aux, &u).ok_or(DiagnosticsError::SingularDesign)?;
    let omega1 = v.transpose() * &v / tf;

    let statistic = tf * (q as f64 - (omega1 * omega0_inv).trace());
    let df = q * (r - 1);
    let chi2 = ChiSquared::new(df as f64).map_err(|_| DiagnosticsError::SingularDesign)?;
    let p_value = chi2.sf(statistic.max(0.0));

    Ok(WhiteTest {
        statistic,
        df,
        p_value,
    })
}
