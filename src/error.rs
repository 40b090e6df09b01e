//! Error types for the skewt-diagram crate.
//!
//! Drawing never fails. Missing or out of range data is skipped element by element. These
//! errors are only produced at the boundaries where a caller hands the engine new view
//! parameters or configuration.
use thiserror::Error;

/// Error type for the crate.
#[derive(Error, Debug)]
pub enum SkewTError {
    /// A height range with `min >= max`, or with a non-finite end, was requested.
    #[error("Degenerate height range: {min} m to {max} m.")]
    DegenerateHeightRange {
        /// Requested bottom of the range in meters.
        min: f64,
        /// Requested top of the range in meters.
        max: f64,
    },
    /// The pressure axis must satisfy `0 < min < max`.
    #[error("Invalid pressure range: {min} hPa to {max} hPa.")]
    InvalidPressureRange {
        /// Requested lowest pressure (top of the diagram) in hPa.
        min: f64,
        /// Requested highest pressure (bottom of the diagram) in hPa.
        max: f64,
    },
    /// The temperature axis must satisfy `min < max`.
    #[error("Invalid temperature range: {min} C to {max} C.")]
    InvalidTemperatureRange {
        /// Requested left edge of the temperature axis in Celsius.
        min: f64,
        /// Requested right edge of the temperature axis in Celsius.
        max: f64,
    },
    /// The margins leave no room for the plot.
    #[error("Margins leave no plot area on a {width} x {height} surface.")]
    LayoutTooSmall {
        /// Surface width.
        width: f64,
        /// Surface height.
        height: f64,
    },
    /// Configuration could not be parsed.
    #[error("Error parsing diagram configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Shorthand for results.
pub type Result<T> = ::std::result::Result<T, SkewTError>;
