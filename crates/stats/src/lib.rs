//! Descriptive statistics helpers for the Janus forecasting workspace.

use serde::Serialize;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    match data.len() {
        0 => 0.0,
        n => data.iter().sum::<f64>() / n as f64,
    }
}

/// Sample variance (`n - 1` denominator). Returns 0.0 below two values.
pub fn variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    ss / (data.len() - 1) as f64
}

/// Sample standard deviation (`n - 1` denominator).
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Median of already sorted values, `None` when empty.
pub fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    }
}

/// Compound growth rate per period, in percent, between two positive levels
/// separated by `periods` steps.
///
/// Returns `None` when either level is non-positive or non-finite, or when
/// `periods` is zero.
pub fn compound_growth_rate(first: f64, last: f64, periods: usize) -> Option<f64> {
    if periods == 0 || !first.is_finite() || !last.is_finite() || first <= 0.0 || last <= 0.0 {
        return None;
    }
    Some(((last / first).powf(1.0 / periods as f64) - 1.0) * 100.0)
}

/// Five-number-style summary of one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub sd: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// Summarise the finite values of `data`.
///
/// Non-finite values are ignored. Returns `None` if no finite value remains.
pub fn summarize(data: &[f64]) -> Option<Summary> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    let median = median(&sorted)?;

    Some(Summary {
        count: sorted.len(),
        mean: mean(&sorted),
        sd: sd(&sorted),
        min: sorted[0],
        median,
        max: sorted[sorted.len() - 1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sd() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sd(&data), 2.138090, epsilon = 1e-6);
    }

    #[test]
    fn test_variance_two() {
        assert_relative_eq!(variance(&[3.0, 7.0]), 8.0, epsilon = 1e-10);
    }

    #[test]
    fn test_variance_single() {
        assert_eq!(variance(&[5.0]), 0.0);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(median(&[1.0, 5.0, 9.0]), Some(5.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_compound_growth_rate() {
        // 100 -> 121 over two periods is 10% a period.
        let g = compound_growth_rate(100.0, 121.0, 2).unwrap();
        assert_relative_eq!(g, 10.0, epsilon = 1e-10);
    }

    #[test]
    fn test_compound_growth_rate_rejects_bad_levels() {
        assert!(compound_growth_rate(0.0, 10.0, 3).is_none());
        assert!(compound_growth_rate(-5.0, 10.0, 3).is_none());
        assert!(compound_growth_rate(5.0, f64::NAN, 3).is_none());
        assert!(compound_growth_rate(5.0, 10.0, 0).is_none());
    }

    #[test]
    fn test_summarize_skips_non_finite() {
        let s = summarize(&[3.0, f64::NAN, 1.0, 2.0, f64::INFINITY]).unwrap();
        assert_eq!(s.count, 3);
        assert_relative_eq!(s.mean, 2.0, epsilon = 1e-12);
        assert_relative_eq!(s.sd, 1.0, epsilon = 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.median, 2.0);
        assert_eq!(s.max, 3.0);
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[]).is_none());
        assert!(summarize(&[f64::NAN]).is_none());
    }
}
