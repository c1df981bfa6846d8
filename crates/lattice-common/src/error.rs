//! Error types for Project Lattice.

use thiserror::Error;

/// Top-level error type for Lattice operations.
#[derive(Debug, Error)]
pub enum LatticeError {
    /// Grid construction errors
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while building a coordinate map.
#[derive(Debug, Error)]
pub enum GridError {
    /// Map too narrow to have a non-corner border and an interior
    #[error("Map width {width} is too small, minimum is {minimum}")]
    TooSmall {
        /// Requested width
        width: usize,
        /// Smallest accepted width
        minimum: usize,
    },

    /// Map too wide to address with 32-bit coordinates
    #[error("Map width {0} exceeds the addressable range")]
    TooLarge(usize),
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value is outside its accepted range
    #[error("Invalid config value `{field}`: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Config file could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;
