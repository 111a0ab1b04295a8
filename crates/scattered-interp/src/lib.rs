//! Scattered-data interpolation of sparse station readings onto a dense grid.
//!
//! Given named point samples and a bounding box, this crate:
//!
//! 1. filters out samples with a missing reading,
//! 2. anchors the four bbox corners with the mean of the valid readings
//!    (linear interpolation is undefined outside the convex hull of the
//!    inputs, and real stations cluster inland; without the anchors the
//!    map edges would be entirely no-data),
//! 3. triangulates the augmented sample set, and
//! 4. evaluates the requested method at every grid cell.
//!
//! Cells the triangulation cannot locate are no-data (`NaN`), which only
//! happens for degenerate input geometry once the corners are anchored.

pub mod delaunay;
pub mod error;
pub mod field;
pub mod interpolate;

pub use delaunay::Triangulation;
pub use error::{InterpError, Result};
pub use field::ScalarField;
pub use interpolate::{corner_anchors, interpolate, InterpolationMethod};
