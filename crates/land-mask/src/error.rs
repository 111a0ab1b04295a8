//! Error types for mask computation and caching.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the land-mask crate.
#[derive(Error, Debug)]
pub enum MaskError {
    /// No cache file exists at the given path.
    #[error("mask cache miss: {0}")]
    CacheMiss(PathBuf),

    /// A cache file exists but was written for a different grid.
    #[error("mask cache dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The cache file is corrupt or not a mask file at all.
    #[error("mask cache format error: {0}")]
    Format(String),

    /// A polygon failed validation.
    #[error("invalid geometry: {0}")]
    Geometry(String),

    /// GeoJSON parsing failed.
    #[error("geojson error: {0}")]
    GeoJson(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MaskError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, MaskError>;
