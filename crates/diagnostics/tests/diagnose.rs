//! Integration tests for janus-diagnostics on fitted VAR models.

use approx::assert_abs_diff_eq;
use janus_diagnostics::{diagnose, shapiro_wilk, white_test};
use janus_panel::{GrowthPanel, TimeSeriesPanel};
use janus_var::VarSpec;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn noise_panel(rows: usize, names: &[&str], seed: u64) -> GrowthPanel {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let columns = names
        .iter()
        .map(|name| {
            let col: Vec<f64> = (0..rows).map(|_| 2.0 + normal.sample(&mut rng)).collect();
            (name.to_string(), col)
        })
        .collect();
    let panel = TimeSeriesPanel::from_columns((0..rows as i32).collect(), columns).unwrap();
    GrowthPanel::new(panel).unwrap()
}

#[test]
fn shapiro_wilk_reference_samples() {
    let x1 = [
        0.11, 7.87, 4.61, 10.14, 7.95, 3.14, 0.46, 4.43, 0.21, 4.75, 0.71, 1.52, 3.24, 0.93, 0.42,
        4.97, 9.53, 4.55, 0.47, 6.66,
    ];
    let sw = shapiro_wilk(&x1).unwrap();
    assert_abs_diff_eq!(sw.statistic, 0.90047299861907959, epsilon = 1e-6);
    assert_abs_diff_eq!(sw.p_value, 0.042089745402336121, epsilon = 1e-6);
    assert!(!sw.is_normal());

    let x2 = [
        1.36, 1.14, 2.92, 2.55, 1.46, 1.06, 5.27, -1.11, 3.48, 1.10, 0.88, -0.51, 1.46, 0.52, 6.20,
        1.69, 0.08, 3.67, 2.81, 3.49,
    ];
    let sw = shapiro_wilk(&x2).unwrap();
    assert_abs_diff_eq!(sw.statistic, 0.9590270, epsilon = 1e-6);
    assert_abs_diff_eq!(sw.p_value, 0.52460, epsilon = 1e-4);
    assert!(sw.is_normal());
}

#[test]
fn small_sample_skips_white_only() {
    // 16 rows, 3 series, lag 3: T = 13 against 1 + 9 + 45 = 55 auxiliary
    // regressors.
    let growth = noise_panel(16, &["PIB", "Investissement", "Balance commerciale"], 3);
    let fit = VarSpec::new(3).fit(&growth).unwrap();
    assert_eq!(fit.nobs(), 13);

    let report = diagnose(&fit);
    assert!(report.white_test.is_none());
    assert!(report.homoscedastic().is_none());
    assert_eq!(report.durbin_watson.len(), 3);
    assert_eq!(report.shapiro_wilk.len(), 3);
    for dw in report.durbin_watson.values() {
        assert!((0.0..=4.0).contains(dw));
    }
}

#[test]
fn full_report_on_long_sample() {
    let growth = noise_panel(120, &["a", "b", "c"], 17);
    let fit = VarSpec::new(1).fit(&growth).unwrap();
    let report = diagnose(&fit);

    let white = report.white_test.unwrap();
    // q = 6 cross-products, r = 1 + 3 + 6 auxiliary regressors
    assert_eq!(white.df, 54);
    assert!(white.statistic.is_finite());
    assert!((0.0..=1.0).contains(&white.p_value));

    for name in ["a", "b", "c"] {
        // White noise residuals: DW near 2.
        let dw = report.durbin_watson[name];
        assert!((1.4..2.6).contains(&dw), "{name}: DW = {dw}");
        assert!(report.no_autocorrelation(name).is_some());
        assert!(report.residuals_normal(name).is_some());
    }
    assert!(report.no_autocorrelation("missing").is_none());
}

#[test]
fn white_detects_variance_driven_by_lag() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let n = 600;
    let mut y = vec![0.0_f64; n];
    for t in 1..n {
        y[t] = 0.5 * y[t - 1] + (0.2 + y[t - 1].abs()) * normal.sample(&mut rng);
    }
    let panel =
        TimeSeriesPanel::from_columns((0..n as i32).collect(), vec![("y".into(), y)]).unwrap();
    let fit = VarSpec::new(1).fit(&GrowthPanel::new(panel).unwrap()).unwrap();

    let white = white_test(fit.residuals(), fit.exog()).unwrap();
    assert_eq!(white.df, 2);
    assert!(white.p_value < 0.01, "p = {}", white.p_value);
}
