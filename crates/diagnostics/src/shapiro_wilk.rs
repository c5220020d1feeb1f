//! Shapiro-Wilk normality test.
//!
//! Royston's approximation (Applied Statistics algorithm AS R94): the
//! coefficients come from polynomial corrections of normal order-statistic
//! expectations, and the p-value from a normalising transform of `W`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::DiagnosticsError;

/// Smallest supported sample.
pub const MIN_N: usize = 3;
/// Largest supported sample.
pub const MAX_N: usize = 5000;

const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// Result of a Shapiro-Wilk test.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapiroWilk {
    /// `W` statistic in `(0, 1]`.
    pub statistic: f64,
    pub p_value: f64,
}

impl ShapiroWilk {
    /// `true` when normality is not rejected at the 5% level.
    pub fn is_normal(&self) -> bool {
        self.p_value > 0.05
    }
}

/// `c[0] + c[1] x + c[2] x^2 + ...`
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

/// Half of the antisymmetric coefficient vector, `a_1..a_{n/2}`, all
/// positive; `a_i` weights `x_(n+1-i) - x_(i)`.
fn coefficients(n: usize, normal: &Normal) -> Vec<f64> {
    let half = n / 2;
    if n == 3 {
        return vec![0.5f64.sqrt()];
    }

    let an25 = n as f64 + 0.25;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / an25))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let mut a = vec![0.0; half];
    a[0] = poly(&C1, rsn) - m[0] / ssumm2;
    let (start, fac) = if n > 5 {
        a[1] = -m[1] / ssumm2 + poly(&C2, rsn);
        let fac = ((summ2 - 2.0 * m[0].powi(2) - 2.0 * m[1].powi(2))
            / (1.0 - 2.0 * a[0].powi(2) - 2.0 * a[1].powi(2)))
        .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0].powi(2)) / (1.0 - 2.0 * a[0].powi(2))).sqrt();
        (1, fac)
    };
    for (ai, mi) in a.iter_mut().zip(&m).skip(start) {
        *ai = -mi / fac;
    }
    a
}

fn p_value(w: f64, n: usize, normal: &Normal) -> f64 {
    if n == 3 {
        let pw = (6.0 / PI) * (w.sqrt().asin() - PI / 3.0);
        return pw.max(0.0);
    }

    let an = n as f64;
    let mut y = (1.0 - w).ln();
    let (m, s) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let ln_n = an.ln();
        (poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };
    normal.sf((y - m) / s)
}

/// Tests `sample` for normality.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`DiagnosticsError::InsufficientSample`] | fewer than 3 finite values |
/// | [`DiagnosticsError::SampleTooLarge`] | more than 5000 values |
/// | [`DiagnosticsError::ConstantSample`] | all values equal |
///
/// # Example
///
/// ```
/// use janus_diagnostics::shapiro_wilk;
///
/// let x = [2.1, 3.4, 1.9, 5.6, 4.4];
/// let sw = shapiro_wilk(&x).unwrap();
/// assert!(sw.statistic > 0.9 && sw.is_normal());
/// ```
pub fn shapiro_wilk(sample: &[f64]) -> Result<ShapiroWilk, DiagnosticsError> {
    let mut x: Vec<f64> = sample.iter().copied().filter(|v| v.is_finite()).collect();
    let n = x.len();
    if n < MIN_N {
        return Err(DiagnosticsError::InsufficientSample { n, min: MIN_N });
    }
    if n > MAX_N {
        return Err(DiagnosticsError::SampleTooLarge { n, max: MAX_N });
    }
    x.sort_by(f64::total_cmp);
    if x[n - 1] - x[0] <= 0.0 {
        return Err(DiagnosticsError::ConstantSample);
    }

    let normal = Normal::standard();
    let a = coefficients(n, &normal);

    let mean = x.iter().sum::<f64>() / n as f64;
    let ssq: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    let num: f64 = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (x[n - 1 - i] - x[i]))
        .sum();
    let w = (num * num / ssq).min(1.0);

    Ok(ShapiroWilk {
        statistic: w,
        p_value: p_value(w, n, &normal),
    })
}
