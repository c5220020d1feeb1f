//! Error types for the janus-panel crate.

/// Error type for all fallible operations in the janus-panel crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PanelError {
    /// Returned when a panel is built without any series.
    #[error("panel has no series")]
    NoSeries,

    /// Returned when the value matrix does not match the year and name vectors.
    #[error("shape mismatch: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        /// Number of years supplied.
        expected_rows: usize,
        /// Number of series names supplied.
        expected_cols: usize,
        /// Rows in the value matrix.
        rows: usize,
        /// Columns in the value matrix.
        cols: usize,
    },

    /// Returned when two series share a name, or a name is blank.
    #[error("invalid series name '{name}': names must be unique and non-empty")]
    InvalidSeriesName {
        /// Offending name.
        name: String,
    },

    /// Returned when years are not strictly increasing.
    #[error("years must be strictly increasing: {previous} followed by {next}")]
    YearsNotIncreasing {
        /// Year at position `i - 1`.
        previous: i32,
        /// Year at position `i`.
        next: i32,
    },

    /// Returned when a requested series is not part of the panel.
    #[error("unknown series '{name}'")]
    UnknownSeries {
        /// Requested name.
        name: String,
    },

    /// Returned when a growth panel would contain NaN or infinite values.
    #[error("growth panel contains non-finite values")]
    NonFiniteData,

    /// Returned when too few complete rows remain for lag selection.
    #[error("insufficient data: got {n} usable rows, need at least {min}")]
    InsufficientData {
        /// Usable rows after cleaning.
        n: usize,
        /// Minimum rows required.
        min: usize,
    },
}
