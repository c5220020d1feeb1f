//! # janus-diagnostics
//!
//! Residual checks for a fitted VAR: first-order autocorrelation, normality
//! and heteroscedasticity.
//!
//! ```mermaid
//! graph LR
//!     A["VarFit"] -->|"diagnose(&fit)"| B["DiagnosticsReport"]
//!     B --> C["durbin_watson: series -> DW"]
//!     B --> D["shapiro_wilk: series -> (W, p)"]
//!     B --> E["white_test: Option&lt;(LM, df, p)&gt;"]
//! ```
//!
//! | Test | Scope | Null hypothesis | Read as fine when |
//! |------|-------|-----------------|-------------------|
//! | Durbin-Watson | per equation | no AR(1) in residuals | `1.5 < DW < 2.5` |
//! | Shapiro-Wilk | per equation | residuals are normal | `p > 0.05` |
//! | White | whole system | homoscedastic residuals | `p > 0.05` |
//!
//! The individual tests are also exposed for use on arbitrary samples.

mod durbin_watson;
mod error;
mod report;
mod shapiro_wilk;
mod white;

pub use durbin_watson::{DW_LOWER, DW_UPPER, durbin_watson, dw_verdict};
pub use error::DiagnosticsError;
pub use report::{DiagnosticsReport, diagnose};
pub use shapiro_wilk::{ShapiroWilk, shapiro_wilk};
pub use white::{WhiteTest, auxiliary_design, white_test};
