//! Round-trip integration tests: levels -> growth -> levels.

use approx::assert_relative_eq;
use janus_panel::{TimeSeriesPanel, percent_change, reconstruct_levels};

fn positive_series(n: usize, seed: u32) -> Vec<f64> {
    // Deterministic, strictly positive and irregular.
    let mut level = 50.0 + seed as f64;
    (0..n)
        .map(|i| {
            let wobble = ((i as f64 * 1.7 + seed as f64).sin() * 6.0) / 100.0;
            level *= 1.0 + 0.02 + wobble;
            level
        })
        .collect()
}

#[test]
fn growth_length_is_input_minus_one() {
    for n in [2, 3, 10, 33] {
        let levels = positive_series(n, n as u32);
        assert!(levels.iter().all(|&x| x > 0.0));
        assert_eq!(percent_change(&levels).len(), n - 1);
    }
}

#[test]
fn reconstruction_recovers_levels() {
    for seed in 0..5 {
        let levels = positive_series(40, seed);
        let growth = percent_change(&levels);
        let rebuilt = reconstruct_levels(&growth, levels[0]);

        assert_eq!(rebuilt.len(), levels.len() - 1);
        for (got, want) in rebuilt.iter().zip(&levels[1..]) {
            assert_relative_eq!(*got, *want, max_relative = 1e-10);
        }
    }
}

#[test]
fn panel_growth_then_reconstruct_each_column() {
    let years: Vec<i32> = (1993..2025).collect();
    let n = years.len();
    let gdp = positive_series(n, 1);
    let inv = positive_series(n, 2);
    let panel = TimeSeriesPanel::from_columns(
        years.clone(),
        vec![("PIB".into(), gdp.clone()), ("Investissement".into(), inv.clone())],
    )
    .unwrap();

    let growth = panel.growth_rates(3).unwrap();
    assert_eq!(growth.n_rows(), n - 1);
    assert_eq!(growth.years(), &years[1..]);

    let rebuilt = reconstruct_levels(&growth.column("PIB").unwrap(), gdp[0]);
    assert_relative_eq!(rebuilt[n - 2], gdp[n - 1], max_relative = 1e-10);

    let rebuilt = reconstruct_levels(&growth.column("Investissement").unwrap(), inv[0]);
    assert_relative_eq!(rebuilt[n - 2], inv[n - 1], max_relative = 1e-10);
}
