//! Information-criterion lag-order selection.

use janus_panel::GrowthPanel;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::criterion::InfoCriterion;
use crate::error::VarError;
use crate::estimate::fit_var;
use crate::fit::VarFit;
use crate::spec::VarSpec;

/// Criterion values of one candidate order, all estimated on the same
/// effective sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LagCandidate {
    pub p: usize,
    pub aic: f64,
    pub bic: f64,
    pub hqic: f64,
    pub fpe: f64,
}

impl LagCandidate {
    fn from_fit(fit: &VarFit) -> Self {
        Self {
            p: fit.lag_order(),
            aic: fit.aic(),
            bic: fit.bic(),
            hqic: fit.hqic(),
            fpe: fit.fpe(),
        }
    }

    /// Value of `criterion` for this candidate.
    pub fn value(&self, criterion: InfoCriterion) -> f64 {
        match criterion {
            InfoCriterion::Aic => self.aic,
            InfoCriterion::Bic => self.bic,
            InfoCriterion::Hqic => self.hqic,
            InfoCriterion::Fpe => self.fpe,
        }
    }
}

/// Candidate scores plus the error of every order that could not be fitted.
struct Scored {
    candidates: Vec<LagCandidate>,
    failures: Vec<VarError>,
}

fn score_candidates(growth: &GrowthPanel, max_lag: usize) -> Scored {
    let mut scored = Scored {
        candidates: Vec::with_capacity(max_lag),
        failures: Vec::new(),
    };
    for p in 1..=max_lag {
        match fit_var(p, growth.values(), growth.names(), max_lag - p) {
            Ok(fit) => scored.candidates.push(LagCandidate::from_fit(&fit)),
            Err(e) => {
                debug!(p, error = %e, "skipping lag candidate");
                scored.failures.push(e);
            }
        }
    }
    scored
}

/// Fits every order `1..=max_lag` on a common sample and reports its
/// criteria.
///
/// Order `p` skips the first `max_lag - p` rows so that every candidate is
/// scored on the same `n - max_lag` observations. Orders that cannot be
/// estimated are left out.
#[tracing::instrument(skip(growth), fields(n = growth.n_rows(), k = growth.n_series()))]
pub fn evaluate_candidates(growth: &GrowthPanel, max_lag: usize) -> Vec<LagCandidate> {
    score_candidates(growth, max_lag).candidates
}

/// Outcome of a lag search: the refitted model and the table it was chosen
/// from.
#[derive(Clone, Debug)]
pub struct LagSelection {
    pub fit: VarFit,
    pub criterion: InfoCriterion,
    /// One entry per order that could be estimated, in increasing `p`.
    pub candidates: Vec<LagCandidate>,
}

/// Smallest order minimising `criterion`; non-finite values never win.
fn best_order(candidates: &[LagCandidate], criterion: InfoCriterion) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for c in candidates {
        let value = c.value(criterion);
        if !value.is_finite() {
            continue;
        }
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((c.p, value)),
        }
    }
    best
}

/// Error when no order survived: a rank-deficient design wins over a short
/// sample, since more data would not fix collinear series.
fn no_candidate_error(failures: Vec<VarError>, max_lag: usize) -> VarError {
    failures
        .into_iter()
        .find(|e| matches!(e, VarError::SingularMatrix { .. }))
        .unwrap_or(VarError::AllCandidatesFailed { max_lag })
}

/// Chooses the lag order in `1..=max_lag` minimising `criterion`, refits
/// that order on the full growth panel and keeps the candidate table.
///
/// Ties keep the smaller order. Candidates whose criterion is not finite are
/// ignored.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`VarError::InvalidLagOrder`] | `max_lag == 0` |
/// | [`VarError::SingularMatrix`] | no order could be estimated and at least one had a rank-deficient design (collinear growth series) |
/// | [`VarError::AllCandidatesFailed`] | no order could be estimated for lack of rows |
/// | any [`VarSpec::fit()`] error | the chosen order fails on the full sample |
///
/// # Example
///
/// ```ignore
/// let selection = select_lag(&growth, 3, InfoCriterion::Bic)?;
/// println!("chosen p = {} of {}", selection.fit.lag_order(), selection.candidates.len());
/// ```
pub fn select_lag(
    growth: &GrowthPanel,
    max_lag: usize,
    criterion: InfoCriterion,
) -> Result<LagSelection, VarError> {
    if max_lag == 0 {
        return Err(VarError::InvalidLagOrder { p: 0 });
    }

    let Scored {
        candidates,
        failures,
    } = score_candidates(growth, max_lag);
    let Some((p, value)) = best_order(&candidates, criterion) else {
        return Err(no_candidate_error(failures, max_lag));
    };
    info!(p, %criterion, value, "selected lag order");

    let fit = VarSpec::new(p).fit(growth)?;
    Ok(LagSelection {
        fit,
        criterion,
        candidates,
    })
}

/// [`select_lag()`] without the candidate table.
///
/// # Errors
///
/// As [`select_lag()`].
pub fn select_order(
    growth: &GrowthPanel,
    max_lag: usize,
    criterion: InfoCriterion,
) -> Result<VarFit, VarError> {
    select_lag(growth, max_lag, criterion).map(|s| s.fit)
}

/// [`select_order()`] with the Akaike criterion.
pub fn select_best_aic(growth: &GrowthPanel, max_lag: usize) -> Result<VarFit, VarError> {
    select_order(growth, max_lag, InfoCriterion::Aic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use janus_panel::TimeSeriesPanel;

    fn growth(rows: usize) -> GrowthPanel {
        let years: Vec<i32> = (0..rows as i32).collect();
        let a: Vec<f64> = (0..rows).map(|i| ((i * 37 % 11) as f64).sin()).collect();
        let b: Vec<f64> = (0..rows).map(|i| ((i * 53 % 13) as f64).cos()).collect();
        let panel =
            TimeSeriesPanel::from_columns(years, vec![("a".into(), a), ("b".into(), b)]).unwrap();
        GrowthPanel::new(panel).unwrap()
    }

    #[test]
    fn zero_max_lag_is_rejected() {
        let err = select_best_aic(&growth(30), 0).unwrap_err();
        assert_eq!(err, VarError::InvalidLagOrder { p: 0 });
    }

    #[test]
    fn candidates_share_sample() {
        let cands = evaluate_candidates(&growth(40), 3);
        assert_eq!(cands.iter().map(|c| c.p).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(cands.iter().all(|c| c.aic.is_finite()));
    }

    #[test]
    fn chosen_order_minimises_criterion() {
        let g = growth(40);
        let cands = evaluate_candidates(&g, 3);
        for criterion in [InfoCriterion::Aic, InfoCriterion::Bic, InfoCriterion::Hqic] {
            let fit = select_order(&g, 3, criterion).unwrap();
            let chosen = cands.iter().find(|c| c.p == fit.lag_order()).unwrap();
            assert!(cands.iter().all(|c| chosen.value(criterion) <= c.value(criterion)));
        }
    }

    #[test]
    fn refit_uses_full_sample() {
        let g = growth(40);
        let fit = select_best_aic(&g, 3).unwrap();
        assert_eq!(fit.nobs(), 40 - fit.lag_order());
    }

    #[test]
    fn too_short_for_every_order() {
        let err = select_best_aic(&growth(4), 2).unwrap_err();
        assert_eq!(err, VarError::AllCandidatesFailed { max_lag: 2 });
    }

    #[test]
    fn infeasible_high_orders_are_skipped() {
        // 12 rows: p = 1 needs 3 + 1 + 3 + 2 = 9, p = 3 needs 1 + 3 + 7 + 2 = 13
        // and p = 4 needs 4 + 9 + 2 = 15.
        let cands = evaluate_candidates(&growth(12), 4);
        assert!(cands.iter().any(|c| c.p == 1));
        assert!(cands.iter().all(|c| c.p < 3));
        let fit = select_best_aic(&growth(12), 4).unwrap();
        assert!(fit.lag_order() < 3);
    }

    #[test]
    fn selection_keeps_candidate_table() {
        let g = growth(40);
        let selection = select_lag(&g, 3, InfoCriterion::Hqic).unwrap();
        assert_eq!(selection.candidates, evaluate_candidates(&g, 3));
        assert_eq!(selection.criterion, InfoCriterion::Hqic);
        assert_eq!(selection.fit, select_order(&g, 3, InfoCriterion::Hqic).unwrap());
    }

    #[test]
    fn singular_failure_outranks_short_sample() {
        let failures = vec![
            VarError::InsufficientData { n: 5, min: 9 },
            VarError::SingularMatrix { lag_order: 2 },
        ];
        assert_eq!(
            no_candidate_error(failures, 3),
            VarError::SingularMatrix { lag_order: 2 }
        );
        let short = vec![VarError::InsufficientData { n: 5, min: 9 }];
        assert_eq!(
            no_candidate_error(short, 1),
            VarError::AllCandidatesFailed { max_lag: 1 }
        );
    }

    #[test]
    fn best_order_skips_non_finite_and_keeps_first_tie() {
        let cand = |p, aic| LagCandidate {
            p,
            aic,
            bic: aic,
            hqic: aic,
            fpe: aic,
        };
        let cands = [cand(1, f64::NAN), cand(2, -1.0), cand(3, -1.0)];
        assert_eq!(best_order(&cands, InfoCriterion::Aic), Some((2, -1.0)));
        assert_eq!(best_order(&[cand(1, f64::INFINITY)], InfoCriterion::Aic), None);
    }
}
