//! Integration test: train on synthetic levels, persist the bundle, read it
//! back and forecast from it.

use std::fs;
use std::sync::Arc;

use janus_diagnostics::diagnose;
use janus_io::{FileCache, IoError, ModelBundle, read_bundle, write_bundle};
use janus_panel::TimeSeriesPanel;
use janus_var::select_best_aic;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn levels() -> TimeSeriesPanel {
    let mut rng = rand::rngs::StdRng::seed_from_u64(21);
    let noise = Normal::new(0.0, 0.3).unwrap();
    let n = 30;
    let mut gdp = vec![500.0];
    let mut inv = vec![80.0];
    for t in 1..n {
        gdp.push(gdp[t - 1] * (1.0 + (3.0 + noise.sample(&mut rng)) / 100.0));
        inv.push(inv[t - 1] * (1.0 + (5.0 + noise.sample(&mut rng)) / 100.0));
    }
    // An extra column with a hole, kept only in the level panel.
    let mut other: Vec<f64> = (0..n).map(|i| i as f64).collect();
    other[4] = f64::NAN;
    TimeSeriesPanel::from_columns(
        (1990..1990 + n as i32).collect(),
        vec![
            ("PIB".into(), gdp),
            ("Investissement".into(), inv),
            ("Autre".into(), other),
        ],
    )
    .unwrap()
}

fn bundle() -> ModelBundle {
    let level_panel = levels();
    let growth_panel = level_panel
        .select(&["PIB", "Investissement"])
        .unwrap()
        .growth_rates(2)
        .unwrap();
    let model_fit = select_best_aic(&growth_panel, 2).unwrap();
    let diagnostics = diagnose(&model_fit);
    ModelBundle {
        model_fit,
        growth_panel,
        level_panel,
        diagnostics,
    }
}

#[test]
fn bundle_round_trip_preserves_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("growth_model_bundle.json");
    let original = bundle();

    write_bundle(&path, &original).unwrap();
    let loaded = read_bundle(&path).unwrap();

    assert_eq!(loaded.model_fit.lag_order(), original.model_fit.lag_order());
    assert_eq!(loaded.model_fit.names(), original.model_fit.names());
    for (a, b) in loaded
        .model_fit
        .coefs()
        .iter()
        .zip(original.model_fit.coefs())
    {
        for (x, y) in a.iter().zip(b.iter()) {
            approx::assert_abs_diff_eq!(x, y, epsilon = 1e-12);
        }
    }
    assert_eq!(loaded.diagnostics.durbin_watson.len(), 2);
    assert_eq!(
        loaded.diagnostics.white_test.is_some(),
        original.diagnostics.white_test.is_some()
    );
    assert!(loaded.level_panel.value_at(1994, "Autre").unwrap().is_nan());
    assert_eq!(loaded.growth_panel.years(), original.growth_panel.years());
}

#[test]
fn bundle_uses_expected_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.json");
    write_bundle(&path, &bundle()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    for key in ["model_fit", "growth_panel", "level_panel", "diagnostics"] {
        assert!(json.get(key).is_some(), "missing field {key}");
    }
}

#[test]
fn loaded_bundle_forecasts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.json");
    write_bundle(&path, &bundle()).unwrap();
    let loaded = read_bundle(&path).unwrap();

    let result = loaded
        .model_fit
        .forecast(loaded.history_tail(), 5, 0.05)
        .unwrap();
    assert_eq!(result.horizon(), 5);
    assert_eq!(loaded.last_year(), Some(2019));
    let anchor = loaded.anchor_level("PIB").unwrap();
    assert_eq!(Some(anchor), loaded.level_panel.value_at(2019, "PIB"));
}

#[test]
fn missing_bundle_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_bundle(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}

#[test]
fn corrupt_bundle_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.json");
    fs::write(&path, "{\"model_fit\": 3}").unwrap();
    assert!(matches!(read_bundle(&path), Err(IoError::Json { .. })));
}

#[test]
fn cache_reuses_bundle_until_invalidated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.json");
    write_bundle(&path, &bundle()).unwrap();

    let cache: FileCache<ModelBundle> = FileCache::new();
    let a = cache.get_or_load(&path, read_bundle).unwrap();
    let b = cache.get_or_load(&path, read_bundle).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);

    assert!(cache.invalidate(&path));
    let c = cache.get_or_load(&path, read_bundle).unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
    // The level panel holds NaN, so compare the model only.
    assert_eq!(a.model_fit, c.model_fit);
}
