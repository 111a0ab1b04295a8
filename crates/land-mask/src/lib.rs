//! Land/ocean masking for gridded fields.
//!
//! A mask marks which cells of a square grid fall on land, defined as the
//! union of a set of polygons. Computing it means testing every grid cell
//! against coastline geometry, so the result is cached in a compact binary
//! file keyed by grid resolution and reused across runs.

pub mod cache;
pub mod error;
pub mod geojson;
pub mod mask;
pub mod polygon;

pub use cache::{get_mask, load_mask, store_mask, MaskCache};
pub use error::{MaskError, Result};
pub use geojson::{load_polygons, parse_polygons};
pub use mask::{compute_mask, compute_mask_parallel, LandMask};
pub use polygon::Polygon;
