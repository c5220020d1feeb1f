//! JSON persistence of a trained model and the data it was trained on.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use janus_diagnostics::DiagnosticsReport;
use janus_panel::{GrowthPanel, TimeSeriesPanel};
use janus_var::VarFit;
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::IoError;

/// Everything a forecasting run needs, produced once by training and read
/// back unchanged.
///
/// | Field | Contents |
/// |-------|----------|
/// | `model_fit` | the selected VAR |
/// | `growth_panel` | growth rates the model was estimated on |
/// | `level_panel` | the level panel as loaded, every column |
/// | `diagnostics` | residual tests of `model_fit` |
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub model_fit: VarFit,
    pub growth_panel: GrowthPanel,
    pub level_panel: TimeSeriesPanel,
    pub diagnostics: DiagnosticsReport,
}

impl ModelBundle {
    /// Seed window for forecasting: the last `p` growth rows.
    pub fn history_tail(&self) -> ArrayView2<'_, f64> {
        self.growth_panel.tail(self.model_fit.lag_order())
    }

    /// Last year of the growth panel, i.e. the year forecasts continue from.
    pub fn last_year(&self) -> Option<i32> {
        self.growth_panel.years().last().copied()
    }

    /// Level of `series` in [`ModelBundle::last_year()`], the anchor for
    /// level reconstruction.
    pub fn anchor_level(&self, series: &str) -> Option<f64> {
        let year = self.last_year()?;
        self.level_panel
            .value_at(year, series)
            .filter(|v| v.is_finite())
    }
}

/// Write `bundle` to `path` as pretty-printed JSON, replacing any existing
/// file.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be created or written and
/// [`IoError::Json`] if encoding fails.
pub fn write_bundle(path: &Path, bundle: &ModelBundle) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::from_io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, bundle)?;
    writer.flush().map_err(|e| IoError::from_io(path, e))?;
    info!(path = %path.display(), "wrote model bundle");
    Ok(())
}

/// Read a bundle written by [`write_bundle()`].
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`IoError::FileNotFound`] | `path` does not exist |
/// | [`IoError::Json`] | the file is not a valid bundle |
/// | [`IoError::Io`] | any other read failure |
pub fn read_bundle(path: &Path) -> Result<ModelBundle, IoError> {
    let file = File::open(path).map_err(|e| IoError::from_io(path, e))?;
    let bundle = serde_json::from_reader(BufReader::new(file))?;
    Ok(bundle)
}
