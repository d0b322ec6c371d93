//! Error types for firerisk-core
//!
//! Numeric paths (forward / layout) are total; errors only occur when
//! parsing or validating values handed in from outside.

/// firerisk-core errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Unknown preset scenario name
    #[error("Unknown preset: {0} (expected one of: current-trend, mitigation, worst-case)")]
    UnknownPreset(String),

    /// Canvas dimension is negative or not finite
    #[error("Invalid extent: width={width}, height={height}")]
    InvalidExtent { width: f32, height: f32 },

    /// Margin leaves no drawable area
    #[error("Margin {margin} too large for canvas {width}x{height}")]
    MarginTooLarge { margin: f32, width: f32, height: f32 },
}

/// Result type for firerisk-core operations
pub type Result<T> = std::result::Result<T, Error>;
