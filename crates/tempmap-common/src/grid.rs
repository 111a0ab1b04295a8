//! Regular grid specification for the interpolated field and the land mask.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{CommonError, CommonResult};

/// Specification of a square regular lon/lat grid over a bounding box.
///
/// Coordinates span both bbox endpoints inclusively: cell `(0, 0)` sits at
/// `(min_lon, min_lat)` and cell `(n-1, n-1)` at `(max_lon, max_lat)`.
/// The field and the mask must be built against the same `GridSpec` so
/// their flat indices line up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    bbox: BoundingBox,
    resolution: usize,
}

impl GridSpec {
    /// Create a grid over `bbox` with `resolution` points per axis.
    pub fn new(bbox: BoundingBox, resolution: usize) -> CommonResult<Self> {
        bbox.validate()?;
        if resolution < 2 {
            return Err(CommonError::ResolutionTooSmall(resolution));
        }
        Ok(Self { bbox, resolution })
    }

    /// The bounding box this grid spans.
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Number of points per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Grid step in the longitude direction.
    pub fn dlon(&self) -> f64 {
        self.bbox.width() / (self.resolution - 1) as f64
    }

    /// Grid step in the latitude direction.
    pub fn dlat(&self) -> f64 {
        self.bbox.height() / (self.resolution - 1) as f64
    }

    /// Longitude of column `col`.
    pub fn lon(&self, col: usize) -> f64 {
        if col == self.resolution - 1 {
            // exact endpoint, no accumulated rounding
            self.bbox.max_lon
        } else {
            self.bbox.min_lon + col as f64 * self.dlon()
        }
    }

    /// Latitude of row `row`.
    pub fn lat(&self, row: usize) -> f64 {
        if row == self.resolution - 1 {
            self.bbox.max_lat
        } else {
            self.bbox.min_lat + row as f64 * self.dlat()
        }
    }

    /// Coordinates of the cell `(col, row)`, or `None` when out of range.
    pub fn point(&self, col: usize, row: usize) -> Option<GridPoint> {
        if col >= self.resolution || row >= self.resolution {
            return None;
        }
        Some(GridPoint {
            lon: self.lon(col),
            lat: self.lat(row),
            col,
            row,
        })
    }

    /// Flat row-major index of the cell `(col, row)`.
    pub fn flat_index(&self, col: usize, row: usize) -> usize {
        row * self.resolution + col
    }

    /// Nearest cell to a coordinate, or `None` when outside the bbox step range.
    pub fn nearest_index(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        let col = ((lon - self.bbox.min_lon) / self.dlon()).round() as isize;
        let row = ((lat - self.bbox.min_lat) / self.dlat()).round() as isize;
        if col < 0 || row < 0 || col >= self.resolution as isize || row >= self.resolution as isize
        {
            return None;
        }
        Some((col as usize, row as usize))
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.resolution * self.resolution
    }

    /// Always false for a constructed grid; kept for slice-like symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.resolution == 0
    }
}

/// A point on the grid with both indices and coordinates.
#[derive(Debug, Clone, Copy)]
pub struct GridPoint {
    pub lon: f64,
    pub lat: f64,
    pub col: usize,
    pub row: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region;

    #[test]
    fn test_inclusive_span() {
        let grid = GridSpec::new(region::REGION_BBOX, 5).unwrap();
        assert_eq!(grid.len(), 25);
        assert_eq!(grid.lon(0), region::REGION_BBOX.min_lon);
        assert_eq!(grid.lon(4), region::REGION_BBOX.max_lon);
        assert_eq!(grid.lat(0), region::REGION_BBOX.min_lat);
        assert_eq!(grid.lat(4), region::REGION_BBOX.max_lat);
    }

    #[test]
    fn test_every_point_inside_bbox() {
        let grid = GridSpec::new(region::REGION_BBOX, 7).unwrap();
        for row in 0..grid.resolution() {
            for col in 0..grid.resolution() {
                let p = grid.point(col, row).unwrap();
                assert!(grid.bbox().contains_point(p.lon, p.lat));
            }
        }
    }

    #[test]
    fn test_rejects_degenerate() {
        assert!(GridSpec::new(region::REGION_BBOX, 1).is_err());
        let flipped = BoundingBox::new(114.5, 22.1, 113.7, 22.6);
        assert!(GridSpec::new(flipped, 10).is_err());
    }

    #[test]
    fn test_nearest_index_roundtrip() {
        let grid = GridSpec::new(region::REGION_BBOX, 11).unwrap();
        let p = grid.point(3, 7).unwrap();
        assert_eq!(grid.nearest_index(p.lon, p.lat), Some((3, 7)));
        assert_eq!(grid.nearest_index(200.0, 22.3), None);
    }
}
