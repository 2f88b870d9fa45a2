use thiserror::Error;

/// Errors returned by the estimators and metrics in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested sample count cannot be drawn from the dataset.
    #[error("invalid sample count: requested {requested}, but dataset has {n_items} items")]
    InvalidSampleCount {
        /// Requested number of samples.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// Two label assignments have different lengths.
    #[error("length mismatch: {left} labels vs {right} labels")]
    LengthMismatch {
        /// Length of the first labeling.
        left: usize,
        /// Length of the second labeling.
        right: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
