//! # janus-panel
//!
//! Year-indexed panels of macroeconomic series and the two pure transforms
//! that sit on either side of the VAR: levels to percent growth rates, and
//! forecast growth rates back to levels.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     A["TimeSeriesPanel (levels)"] -->|".select(..)?.complete_cases()"| B["TimeSeriesPanel"]
//!     B -->|".growth_rates(max_lag)?"| C["GrowthPanel"]
//!     C -->|"VAR fit + forecast"| D["growth forecasts"]
//!     D -->|"reconstruct_levels(&g, last_level)"| E["level forecasts"]
//! ```
//!
//! ## Conventions
//!
//! | Item | Convention |
//! |------|------------|
//! | rows | one per year, strictly increasing |
//! | columns | one per named series, names unique |
//! | growth | percent, `(x[t] - x[t-1]) / x[t-1] * 100` |
//! | missing | `NaN` in a level panel; never present in a [`GrowthPanel`] |

mod error;
mod growth;
mod levels;
mod panel;

pub use error::PanelError;
pub use growth::{GrowthPanel, percent_change};
pub use levels::{LevelInterval, reconstruct_interval, reconstruct_levels};
pub use panel::TimeSeriesPanel;
