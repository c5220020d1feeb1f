//! VAR model specification (unfitted).

use janus_panel::GrowthPanel;
use serde::{Deserialize, Serialize};

use crate::error::VarError;
use crate::fit::VarFit;

/// An unfitted VAR(p) model specification.
///
/// This is the entry point of the typestate workflow. Create a spec with
/// [`VarSpec::new()`], then call [`VarSpec::fit()`] to obtain a [`VarFit`].
///
/// # Typestate Workflow
///
/// ```mermaid
/// graph LR
///     A["VarSpec::new(p)"] -->|".fit(&growth)?"| B["VarFit"]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarSpec {
    p: usize,
}

impl VarSpec {
    /// Creates a new VAR(p) specification with lag order `p`.
    ///
    /// # Example
    ///
    /// ```
    /// use janus_var::VarSpec;
    ///
    /// let spec = VarSpec::new(2);
    /// assert_eq!(spec.p(), 2);
    /// ```
    pub fn new(p: usize) -> Self {
        Self { p }
    }

    /// Returns the lag order (`p`).
    pub fn p(&self) -> usize {
        self.p
    }

    /// Fits this VAR(p) to a growth panel by least squares, using every row
    /// (the first `p` as presample).
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`VarError::InvalidLagOrder`] | `p == 0` |
    /// | [`VarError::InsufficientData`] | fewer than `p + kp + 1 + k` rows |
    /// | [`VarError::SingularMatrix`] | rank-deficient design or degenerate residual covariance |
    pub fn fit(&self, growth: &GrowthPanel) -> Result<VarFit, VarError> {
        crate::estimate::fit_var(self.p, growth.values(), growth.names(), 0)
    }
}
