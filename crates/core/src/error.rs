//! Error types for the picker core.

use thiserror::Error;

/// Errors produced by picker operations.
///
/// Out-of-gamut colors are deliberately absent: a color that fails the gamut
/// test is an expected outcome and is reported as `None`, not as an error.
#[derive(Debug, Error)]
pub enum PickerError {
    /// Width or height was zero, or `width * height` overflowed.
    #[error("invalid dimensions: {width}x{height} (width and height must be non-zero)")]
    InvalidDimensions { width: usize, height: usize },

    /// The total width, height and hue-strip width do not describe a usable widget.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A known attribute carried a value that does not parse as the expected number.
    #[error("invalid value {value:?} for attribute '{name}'")]
    InvalidAttribute { name: String, value: String },

    /// An attribute name that the picker does not observe.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// A raw pixel block did not match the declared dimensions.
    #[error("dimension mismatch: expected {expected} bytes, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// File output failed.
    #[error("i/o error: {0}")]
    Io(String),
}
