//! Level reconstruction from forecast growth rates.

use serde::{Deserialize, Serialize};

/// Compounds percent growth rates onto `last_known_level`.
///
/// `level[i] = level[i-1] * (1 + growth[i] / 100)` with `level[-1]` equal to
/// `last_known_level`, which must be the last *observed* level. The output
/// has the same length as `growth`.
///
/// # Example
///
/// ```
/// use janus_panel::reconstruct_levels;
///
/// let levels = reconstruct_levels(&[10.0, -50.0], 100.0);
/// assert!((levels[0] - 110.0).abs() < 1e-12);
/// assert!((levels[1] - 55.0).abs() < 1e-12);
/// ```
pub fn reconstruct_levels(growth: &[f64], last_known_level: f64) -> Vec<f64> {
    growth
        .iter()
        .scan(last_known_level, |level, &g| {
            *level *= 1.0 + g / 100.0;
            Some(*level)
        })
        .collect()
}

/// Point and bound level paths reconstructed from growth forecasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInterval {
    pub point: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Reconstructs point, lower and upper level paths independently.
///
/// Compounding is not linear, so each growth path is compounded on its own
/// from the same anchor; the level bounds are never derived from the point
/// path.
pub fn reconstruct_interval(
    point: &[f64],
    lower: &[f64],
    upper: &[f64],
    last_known_level: f64,
) -> LevelInterval {
    LevelInterval {
        point: reconstruct_levels(point, last_known_level),
        lower: reconstruct_levels(lower, last_known_level),
        upper: reconstruct_levels(upper, last_known_level),
    }
}
