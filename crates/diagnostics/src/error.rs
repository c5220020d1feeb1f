//! Diagnostics error types.

/// Reasons a residual test cannot produce a statistic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiagnosticsError {
    /// The sample is too small for the test.
    #[error("insufficient sample: got {n} observations, need at least {min}")]
    InsufficientSample { n: usize, min: usize },

    /// The sample exceeds the range the test is calibrated for.
    #[error("sample too large: got {n} observations, at most {max} supported")]
    SampleTooLarge { n: usize, max: usize },

    /// Every value in the sample is identical.
    #[error("sample has zero range")]
    ConstantSample,

    /// The auxiliary regression could not be solved.
    #[error("auxiliary regression design is singular")]
    SingularDesign,

    /// Residual and regressor matrices disagree on the number of rows.
    #[error("residuals have {residuals} rows but regressors have {regressors}")]
    RowMismatch { residuals: usize, regressors: usize },
}
