//! Multivariate least-squares estimation of a VAR(p).
//!
//! Stacks the lagged design once and solves all equations together with an
//! SVD, which also provides the numerical rank used to reject collinear
//! designs.
//!
//! **Not part of the public API.**

use nalgebra::{Cholesky, DMatrix};
use ndarray::{Array2, ArrayView2, s};

use crate::error::VarError;
use crate::fit::VarFit;
use crate::spec::VarSpec;

/// Builds `(design, targets)` for a VAR(p).
///
/// The first `offset` rows are ignored entirely and the next `p` serve as
/// presample. Row `t` of the design is `[1, y_{t-1}', ..., y_{t-p}']`.
pub(crate) fn lagged_design(
    data: ArrayView2<'_, f64>,
    p: usize,
    offset: usize,
) -> (Array2<f64>, Array2<f64>) {
    let (n, k) = data.dim();
    let start = offset + p;
    let t_eff = n.saturating_sub(start);
    let m = 1 + k * p;

    let mut design = Array2::zeros((t_eff, m));
    for row in 0..t_eff {
        let t = start + row;
        design[[row, 0]] = 1.0;
        for lag in 1..=p {
            let lagged = data.row(t - lag);
            let col0 = 1 + (lag - 1) * k;
            design
                .slice_mut(s![row, col0..col0 + k])
                .assign(&lagged);
        }
    }

    let targets = data.slice(s![start.., ..]).to_owned();
    (design, targets)
}

/// Numerical rank of `x` from its singular values.
///
/// Uses the tolerance `max(rows, cols) * eps * sigma_max`.
fn numerical_rank(singular_values: &[f64], rows: usize, cols: usize) -> usize {
    let smax = singular_values.iter().cloned().fold(0.0, f64::max);
    let tol = rows.max(cols) as f64 * f64::EPSILON * smax;
    singular_values.iter().filter(|&&s| s > tol).count()
}

/// Solves `targets = design * B + E` for `B` by least squares.
///
/// Returns `None` if `design` does not have full column rank.
pub(crate) fn least_squares(design: &Array2<f64>, targets: &Array2<f64>) -> Option<Array2<f64>> {
    let (rows, cols) = design.dim();
    let x = DMatrix::from_fn(rows, cols, |i, j| design[[i, j]]);
    let y = DMatrix::from_fn(targets.nrows(), targets.ncols(), |i, j| targets[[i, j]]);

    let svd = x.svd(true, true);
    if numerical_rank(svd.singular_values.as_slice(), rows, cols) < cols {
        return None;
    }
    let b = svd.solve(&y, f64::EPSILON).ok()?;
    Some(Array2::from_shape_fn((b.nrows(), b.ncols()), |(i, j)| b[(i, j)]))
}

/// Log-determinant of a symmetric positive-definite matrix.
///
/// Returns `None` if the matrix is not positive definite.
pub(crate) fn log_det_spd(a: &Array2<f64>) -> Option<f64> {
    let n = a.nrows();
    let m = DMatrix::from_fn(n, n, |i, j| a[[i, j]]);
    let chol = Cholesky::new(m)?;
    let l = chol.l();
    let log_det = 2.0 * (0..n).map(|i| l[(i, i)].ln()).sum::<f64>();
    log_det.is_finite().then_some(log_det)
}

/// Fits a VAR(p) to `data` (rows = time, columns = series).
///
/// This is the full pipeline:
/// 1. Validate order and data
/// 2. Build the lagged design, skipping `offset` leading rows
/// 3. Least-squares solve with a rank check
/// 4. Residuals, covariances and log-likelihood
pub(crate) fn fit_var(
    p: usize,
    data: ArrayView2<'_, f64>,
    names: &[String],
    offset: usize,
) -> Result<VarFit, VarError> {
    // 1. Validate
    if p == 0 {
        return Err(VarError::InvalidLagOrder { p });
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(VarError::NonFiniteData);
    }
    let (n, k) = data.dim();
    let m = 1 + k * p;
    // Sigma_u needs k residual degrees of freedom to be full rank.
    let min_len = offset + p + m + k;
    if n < min_len {
        return Err(VarError::InsufficientData { n, min: min_len });
    }

    // 2. Design
    let (design, targets) = lagged_design(data, p, offset);
    let t_eff = design.nrows();

    // 3. Solve
    let b = least_squares(&design, &targets).ok_or(VarError::SingularMatrix { lag_order: p })?;

    // 4. Residuals and covariances
    let residuals = &targets - &design.dot(&b);
    let cross = residuals.t().dot(&residuals);
    let sigma_u_mle = &cross / t_eff as f64;
    let sigma_u = &cross / (t_eff - m) as f64;

    let log_det =
        log_det_spd(&sigma_u_mle).ok_or(VarError::SingularMatrix { lag_order: p })?;
    let tf = t_eff as f64;
    let kf = k as f64;
    let log_likelihood =
        -0.5 * tf * kf * (1.0 + (2.0 * std::f64::consts::PI).ln()) - 0.5 * tf * log_det;

    // B is (1 + kp) x k; row 0 holds intercepts, rows 1 + (j-1)k .. 1 + jk
    // hold A_j transposed.
    let intercept = b.row(0).to_vec();
    let coefs = (1..=p)
        .map(|lag| {
            let r0 = 1 + (lag - 1) * k;
            b.slice(s![r0..r0 + k, ..]).t().to_owned()
        })
        .collect();

    Ok(VarFit::new(
        VarSpec::new(p),
        names.to_vec(),
        intercept,
        coefs,
        sigma_u,
        sigma_u_mle,
        residuals,
        design,
        log_likelihood,
        log_det,
        n,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn design_layout() {
        let data = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]];
        let (x, y) = lagged_design(data.view(), 2, 0);
        assert_eq!(x.dim(), (2, 5));
        assert_eq!(x.row(0).to_vec(), vec![1.0, 2.0, 20.0, 1.0, 10.0]);
        assert_eq!(x.row(1).to_vec(), vec![1.0, 3.0, 30.0, 2.0, 20.0]);
        assert_eq!(y.row(0).to_vec(), vec![3.0, 30.0]);
    }

    #[test]
    fn design_with_offset() {
        let data = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
        let (x, y) = lagged_design(data.view(), 1, 2);
        assert_eq!(x.nrows(), 2);
        assert_eq!(x.row(0).to_vec(), vec![1.0, 3.0]);
        assert_eq!(y.column(0).to_vec(), vec![4.0, 5.0]);
    }

    #[test]
    fn least_squares_exact_line() {
        // y = 2 + 3x
        let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
        let y = array![[2.0], [5.0], [8.0], [11.0]];
        let b = least_squares(&x, &y).unwrap();
        assert_abs_diff_eq!(b[[0, 0]], 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(b[[1, 0]], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn least_squares_rejects_collinear_columns() {
        let x = array![[1.0, 2.0], [1.0, 2.0], [1.0, 2.0]];
        let y = array![[1.0], [2.0], [3.0]];
        assert!(least_squares(&x, &y).is_none());
    }

    #[test]
    fn log_det_identity_is_zero() {
        let a = Array2::<f64>::eye(3);
        assert_abs_diff_eq!(log_det_spd(&a).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn log_det_rejects_singular() {
        let a = array![[1.0, 1.0], [1.0, 1.0]];
        assert!(log_det_spd(&a).is_none());
    }

    #[test]
    fn fit_rejects_zero_order() {
        let data = Array2::<f64>::zeros((10, 2));
        let err = fit_var(0, data.view(), &["a".into(), "b".into()], 0).unwrap_err();
        assert_eq!(err, VarError::InvalidLagOrder { p: 0 });
    }

    #[test]
    fn fit_rejects_short_sample() {
        let data = Array2::<f64>::ones((5, 3));
        let names = vec!["a".into(), "b".into(), "c".into()];
        let err = fit_var(1, data.view(), &names, 0).unwrap_err();
        // m = 4, need 1 + 4 + 3 rows
        assert_eq!(err, VarError::InsufficientData { n: 5, min: 8 });
    }

    #[test]
    fn fit_rejects_constant_series() {
        // A constant column duplicates the intercept.
        let data = Array2::from_shape_fn((20, 2), |(i, j)| {
            if j == 0 { 1.0 } else { ((i * 7) % 5) as f64 }
        });
        let err = fit_var(1, data.view(), &["flat".into(), "b".into()], 0).unwrap_err();
        assert_eq!(err, VarError::SingularMatrix { lag_order: 1 });
    }

    #[test]
    fn fit_rejects_nan() {
        let mut data = Array2::from_shape_fn((20, 1), |(i, _)| i as f64);
        data[[3, 0]] = f64::NAN;
        let err = fit_var(1, data.view(), &["a".into()], 0).unwrap_err();
        assert_eq!(err, VarError::NonFiniteData);
    }
}
