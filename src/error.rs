//! Error types for the engraving pipeline.

use thiserror::Error;

/// Errors surfaced by the engraving pipeline.
///
/// All variants are recoverable at the caller: the pipeline aborts the
/// invocation without partial output and never substitutes a default image.
#[derive(Debug, Error)]
pub enum EngraveError {
    /// Input bytes could not be interpreted as a raster image
    #[error("failed to decode input image: {0}")]
    Decode(String),

    /// Rescaled output would be zero-area
    #[error("rescaled output would be empty: {width}x{height} at {resolution} dpi")]
    InvalidDimensions {
        width: u32,
        height: u32,
        resolution: u32,
    },

    /// A setting is outside its documented range
    #[error("parameter {name} out of range: {value} (expected {min} to {max})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Final buffer could not be serialized
    #[error("failed to encode output image: {0}")]
    Encode(String),
}
