//! Error types for the janus-var crate.

/// Error type for all fallible operations in the janus-var crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VarError {
    /// Returned when a lag order of zero is requested.
    #[error("lag order must be at least 1, got {p}")]
    InvalidLagOrder {
        /// Requested order.
        p: usize,
    },

    /// Returned when the input contains NaN or infinite values.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when there are too few rows for the requested order.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Rows provided.
        n: usize,
        /// Rows required.
        min: usize,
    },

    /// Returned when the regressor matrix or the residual covariance is
    /// rank-deficient.
    #[error("singular regressor matrix at lag order {lag_order}")]
    SingularMatrix {
        /// Lag order being estimated.
        lag_order: usize,
    },

    /// Returned when no candidate order could be estimated.
    #[error("all VAR candidates failed (max_lag={max_lag})")]
    AllCandidatesFailed {
        /// Largest order attempted.
        max_lag: usize,
    },

    /// Returned when the forecast seed window does not hold exactly `p` rows.
    #[error("forecast history must have exactly {expected} rows, got {got}")]
    InsufficientHistory {
        /// The fitted lag order.
        expected: usize,
        /// Rows supplied.
        got: usize,
    },

    /// Returned when the forecast seed window has the wrong number of series.
    #[error("forecast history must have {expected} columns, got {got}")]
    SeriesMismatch {
        /// Series in the fitted model.
        expected: usize,
        /// Columns supplied.
        got: usize,
    },

    /// Returned when the significance level is outside (0, 1).
    #[error("alpha must lie in (0, 1), got {alpha}")]
    InvalidAlpha {
        /// Supplied significance level.
        alpha: f64,
    },

    /// Returned when an information criterion name is not recognised.
    #[error("unknown information criterion '{name}' (expected aic, bic, hqic or fpe)")]
    UnknownCriterion {
        /// Supplied name.
        name: String,
    },
}
