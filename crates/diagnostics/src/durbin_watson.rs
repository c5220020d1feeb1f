//! Durbin-Watson autocorrelation statistic.

/// Lower bound of the band read as "no strong autocorrelation".
pub const DW_LOWER: f64 = 1.5;
/// Upper bound of the band read as "no strong autocorrelation".
pub const DW_UPPER: f64 = 2.5;

/// `sum (e[t] - e[t-1])^2 / sum e[t]^2`.
///
/// Returns `None` for an empty series or one whose residuals are all zero.
/// Ranges over `[0, 4]`; values near 2 mean no first-order autocorrelation.
pub fn durbin_watson(residuals: &[f64]) -> Option<f64> {
    let denom: f64 = residuals.iter().map(|e| e * e).sum();
    if denom <= 0.0 || !denom.is_finite() {
        return None;
    }
    let num: f64 = residuals
        .windows(2)
        .map(|w| (w[1] - w[0]).powi(2))
        .sum();
    Some(num / denom)
}

/// `true` when `dw` lies strictly inside `(1.5, 2.5)`.
pub fn dw_verdict(dw: f64) -> bool {
    dw > DW_LOWER && dw < DW_UPPER
}
