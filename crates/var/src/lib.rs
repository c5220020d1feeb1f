//! # janus-var
//!
//! VAR(p) estimation by least squares, lag-order selection by information
//! criterion, and analytic multi-step forecast intervals.
//!
//! ## Typestate Workflow
//!
//! ```mermaid
//! graph LR
//!     A["VarSpec::new(p)"] -->|".fit(&growth)?"| B["VarFit"]
//!     H["select_order(&growth, max_lag, criterion)?"] -->|"compare 1..=max_lag"| B
//!     B --> C[".coefs() / .intercept()"]
//!     B --> D[".residuals() / .exog()"]
//!     B --> E[".aic() / .bic() / .hqic() / .fpe()"]
//!     B --> F[".forecast(&tail, h, alpha)?"]
//!     F --> G["ForecastResult"]
//! ```
//!
//! ## Two Usage Paths
//!
//! **Direct fit** (known order):
//! ```ignore
//! let fit = VarSpec::new(2).fit(&growth)?;
//! ```
//!
//! **Criterion search** (unknown order):
//! ```ignore
//! let fit = select_best_aic(&growth, 3)?;
//! ```
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | c | [`VarFit::intercept()`] | equation intercepts |
//! | A_j | [`VarFit::coefs()`] | lag-j coefficient matrix, row = equation |
//! | Sigma_u | [`VarFit::sigma_u()`] | residual covariance, `E'E / (T - kp - 1)` |
//! | Phi_i | [`VarFit::ma_coefficients()`] | moving-average weights |
//! | X | [`VarFit::exog()`] | design matrix `[1, y_{t-1}', ..., y_{t-p}']` |

mod criterion;
mod error;
mod estimate;
mod fit;
mod forecast;
mod selection;
mod spec;

pub use criterion::InfoCriterion;
pub use error::VarError;
pub use fit::VarFit;
pub use forecast::{ForecastResult, SeriesForecast};
pub use selection::{
    LagCandidate, LagSelection, evaluate_candidates, select_best_aic, select_lag, select_order,
};
pub use spec::VarSpec;
