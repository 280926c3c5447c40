//! Error types for tour optimization.
//!
//! Every [`TourError`] is a structural input problem and is fatal to the
//! call that raised it. Constraint infeasibility found during a search is
//! not an error; it is reported through [`Coverage`](crate::models::Coverage).

use thiserror::Error;

/// Coarse classification of a [`TourError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed an argument the optimizer cannot work with.
    InvalidArgument,
}

/// Errors raised by matrix construction, the greedy constructor and the refiners.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TourError {
    /// The start index does not name a point.
    #[error("start index {index} is out of range for {size} points")]
    StartIndexOutOfRange {
        /// Requested start index.
        index: usize,
        /// Number of points.
        size: usize,
    },

    /// A path refers to a point that does not exist.
    #[error("path index {index} is out of range for {size} points")]
    PathIndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of points.
        size: usize,
    },

    /// A return-to-start path does not begin and end at the same point.
    #[error("closed path must start and end at the same point")]
    PathNotClosed,

    /// A point is visited more than once inside a path.
    #[error("point {index} appears more than once in the path")]
    DuplicateIndex {
        /// Repeated point index.
        index: usize,
    },

    /// Travel speed must be a positive, finite number.
    #[error("speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),

    /// An explicit matrix is not square.
    #[error("matrix row {row} has {len} entries, expected {size}")]
    NotSquare {
        /// Row with the wrong length.
        row: usize,
        /// Length of that row.
        len: usize,
        /// Number of rows.
        size: usize,
    },

    /// An explicit matrix holds a negative or non-finite entry.
    #[error("matrix entry ({row}, {col}) must be finite and non-negative, got {value}")]
    InvalidEntry {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Offending value.
        value: f64,
    },

    /// An explicit matrix is not symmetric.
    #[error("matrix is not symmetric at ({row}, {col})")]
    Asymmetric {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// Time-window data does not cover the same points as the distance matrix.
    #[error("time window context covers {context} points but the distance matrix has {matrix}")]
    ContextSizeMismatch {
        /// Size of the time-window context.
        context: usize,
        /// Size of the distance matrix.
        matrix: usize,
    },

    /// The annealing cooling schedule is unusable.
    #[error("invalid annealing configuration: {0}")]
    InvalidAnnealConfig(String),
}

impl TourError {
    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}
