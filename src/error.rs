//! Error types for the crate
//!
//! Every fallible operation returns the crate [Result], so errors from the
//! mesh operations, the interpolator, and the readers/writers can all be
//! propagated with `?`.

/// Type alias for `Result<T, meshdata::Error>`
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when building or manipulating a mesh
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Axis count or axis length does not match the data array
    #[error("shape mismatch: {0}")]
    Shape(String),

    /// Number of limits or target axes does not match the requested axes
    #[error("expected {expected} entries for the requested axes, found {found}")]
    Arity { expected: usize, found: usize },

    /// A crop range collapsed to a single sample
    #[error("selected empty slice along axis {axis}")]
    EmptySlice { axis: usize },

    /// Axis index is not a dimension of the data
    #[error("axis {axis} is out of range for {ndim}-dimensional data")]
    AxisIndex { axis: usize, ndim: usize },

    /// Labels or units must cover every axis, plus optionally the data
    #[error("expected {ndim} or {} {kind}, found {found}", .ndim + 1)]
    LabelCount {
        kind: &'static str,
        ndim: usize,
        found: usize,
    },

    /// Grid interpolation requires strictly increasing axes
    #[error("axis {axis} is not strictly increasing")]
    Unsorted { axis: usize },

    /// JSON has no representation for NaN or infinity
    #[error("non-finite value in {field}, which JSON can not represent")]
    NonFinite { field: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Binary(#[from] bincode::Error),
}
