//! Error types for interpolation.

use thiserror::Error;

/// Errors that can occur while interpolating station readings.
#[derive(Error, Debug)]
pub enum InterpError {
    /// Fewer than the minimum number of valid samples after filtering.
    #[error("insufficient data: {valid} valid samples, need at least {required}")]
    InsufficientData { valid: usize, required: usize },

    /// Invalid grid geometry (bad bbox or resolution).
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] tempmap_common::CommonError),

    /// Interpolation method name that matches no known method.
    #[error("unknown interpolation method {0:?} (expected linear, nearest or cubic)")]
    UnknownMethod(String),
}

impl InterpError {
    /// Create an InsufficientData error.
    pub fn insufficient(valid: usize, required: usize) -> Self {
        Self::InsufficientData { valid, required }
    }
}

/// Result type for interpolation operations.
pub type Result<T> = std::result::Result<T, InterpError>;
