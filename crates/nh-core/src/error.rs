//! Error types for the histogram data model.

use thiserror::Error;

/// Data-model error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Axis constructed with a reversed or degenerate range.
    #[error("axis `{name}`: range minimum {min} must be below maximum {max}")]
    BadAxisRange {
        /// Axis name.
        name: String,
        /// Offending lower limit.
        min: f64,
        /// Offending upper limit.
        max: f64,
    },

    /// Axis constructed with zero regular bins.
    #[error("axis `{0}` needs at least one regular bin")]
    NoBins(String),

    /// Histogram constructed without any axis descriptors.
    #[error("histogram needs at least one axis")]
    NoAxes,

    /// Payload extent does not match the axis bin count plus flow bins.
    #[error(
        "dimension {dim}: payload extent {extent} does not match axis \
         `{axis}` ({expected} = n_bins + 2 flow bins)"
    )]
    ShapeMismatch {
        /// Dimension index.
        dim: usize,
        /// Extent found in the payload.
        extent: usize,
        /// Axis name for that dimension.
        axis: String,
        /// Expected extent.
        expected: usize,
    },

    /// Accumulation attempted between histograms that do not line up.
    #[error("incompatible histograms: {0}")]
    Incompatible(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
