//! Residual diagnostics of a fitted VAR, collected into one report.

use std::collections::BTreeMap;

use janus_var::VarFit;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::durbin_watson::{durbin_watson, dw_verdict};
use crate::shapiro_wilk::{ShapiroWilk, shapiro_wilk};
use crate::white::{WhiteTest, white_test};

/// Test results keyed by series name.
///
/// A series missing from `durbin_watson` or `shapiro_wilk` had no computable
/// statistic; `white_test` is `None` when the joint test could not run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub durbin_watson: BTreeMap<String, f64>,
    pub shapiro_wilk: BTreeMap<String, ShapiroWilk>,
    pub white_test: Option<WhiteTest>,
}

impl DiagnosticsReport {
    /// Durbin-Watson verdict for `series`: `Some(true)` inside `(1.5, 2.5)`.
    pub fn no_autocorrelation(&self, series: &str) -> Option<bool> {
        self.durbin_watson.get(series).map(|&dw| dw_verdict(dw))
    }

    /// Shapiro-Wilk verdict for `series`: `Some(true)` when `p > 0.05`.
    pub fn residuals_normal(&self, series: &str) -> Option<bool> {
        self.shapiro_wilk.get(series).map(ShapiroWilk::is_normal)
    }

    /// White verdict: `Some(true)` when `p > 0.05`, `None` if not computed.
    pub fn homoscedastic(&self) -> Option<bool> {
        self.white_test.as_ref().map(WhiteTest::is_homoscedastic)
    }
}

/// Runs every residual test on `fit`.
///
/// Never fails: a test that cannot be computed for a series (or, for White,
/// for the system) is left out of the report.
#[tracing::instrument(skip(fit), fields(p = fit.lag_order(), nobs = fit.nobs()))]
pub fn diagnose(fit: &VarFit) -> DiagnosticsReport {
    let mut report = DiagnosticsReport::default();
    let residuals = fit.residuals();

    for (name, col) in fit.names().iter().zip(residuals.columns()) {
        let e = col.to_vec();
        match durbin_watson(&e) {
            Some(dw) => {
                report.durbin_watson.insert(name.clone(), dw);
            }
            None => debug!(series = %name, "no Durbin-Watson statistic"),
        }
        match shapiro_wilk(&e) {
            Ok(sw) => {
                report.shapiro_wilk.insert(name.clone(), sw);
            }
            Err(err) => debug!(series = %name, error = %err, "no Shapiro-Wilk statistic"),
        }
    }

    match white_test(residuals, fit.exog()) {
        Ok(w) => report.white_test = Some(w),
        Err(err) => warn!(error = %err, "White test could not be computed"),
    }

    report
}
