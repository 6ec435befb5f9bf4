//! Error types for the valuation engine.

use thiserror::Error;

/// Result type alias using the engine error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the valuation engine.
///
/// The engine prefers sentinel values (`0` intrinsic value, `None` growth)
/// for expected edge cases; an `Error` is only raised for out-of-range
/// configuration or for upstream data too incomplete to run a model at all.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration value outside its documented range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Required upstream data is missing
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

impl Error {
    /// Check if this is a configuration error.
    pub const fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }

    /// Check if this is a missing-data error.
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData(_))
    }
}
