//! Error types for the shared crate.

use thiserror::Error;

/// Errors raised while constructing or validating shared types.
#[derive(Error, Debug)]
pub enum CommonError {
    /// Bounding box with min >= max on an axis.
    #[error("invalid bounding box: {0}")]
    InvalidBounds(String),

    /// Grid resolution too small to form a mesh.
    #[error("grid resolution must be >= 2, got {0}")]
    ResolutionTooSmall(usize),
}

impl CommonError {
    /// Create an InvalidBounds error.
    pub fn invalid_bounds(msg: impl Into<String>) -> Self {
        Self::InvalidBounds(msg.into())
    }
}

/// Result type for shared-type operations.
pub type CommonResult<T> = std::result::Result<T, CommonError>;
