//! Dense land/ocean mask computation over a grid.

use rayon::prelude::*;
use tempmap_common::GridSpec;

use crate::polygon::Polygon;

/// A dense boolean mask aligned to a square grid, row-major.
///
/// `true` marks a land cell (inside at least one polygon).
#[derive(Debug, Clone, PartialEq)]
pub struct LandMask {
    cells: Vec<bool>,
    resolution: usize,
}

impl LandMask {
    /// Wrap row-major cells. Panics if the length is not n*n.
    pub fn from_cells(resolution: usize, cells: Vec<bool>) -> Self {
        assert_eq!(cells.len(), resolution * resolution);
        Self { cells, resolution }
    }

    /// Points per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Cell at `(col, row)`.
    pub fn get(&self, col: usize, row: usize) -> bool {
        self.cells[row * self.resolution + col]
    }

    /// Number of land cells.
    pub fn land_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Scan every grid cell against every polygon, sequentially.
pub fn compute_mask(polygons: &[Polygon], grid: &GridSpec) -> LandMask {
    let n = grid.resolution();
    let mut cells = vec![false; grid.len()];
    for row in 0..n {
        let lat = grid.lat(row);
        for col in 0..n {
            let lon = grid.lon(col);
            cells[row * n + col] = polygons.iter().any(|p| p.contains(lon, lat));
        }
    }
    LandMask::from_cells(n, cells)
}

/// Row-parallel variant of [`compute_mask`].
///
/// Rows are independent, so the scan partitions cleanly; the result is
/// identical to the sequential scan.
pub fn compute_mask_parallel(polygons: &[Polygon], grid: &GridSpec) -> LandMask {
    let n = grid.resolution();
    let mut cells = vec![false; grid.len()];
    cells
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(row, row_cells)| {
            let lat = grid.lat(row);
            for (col, cell) in row_cells.iter_mut().enumerate() {
                let lon = grid.lon(col);
                *cell = polygons.iter().any(|p| p.contains(lon, lat));
            }
        });
    LandMask::from_cells(n, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempmap_common::BoundingBox;

    fn grid(resolution: usize) -> GridSpec {
        GridSpec::new(BoundingBox::new(0.0, 0.0, 3.0, 3.0), resolution).unwrap()
    }

    fn left_half() -> Vec<Polygon> {
        vec![Polygon::new(vec![[-0.1, -0.1], [1.5, -0.1], [1.5, 3.1], [-0.1, 3.1]]).unwrap()]
    }

    #[test]
    fn test_half_plane_mask() {
        // resolution 4 over [0,3]: columns at lon 0,1,2,3
        let mask = compute_mask(&left_half(), &grid(4));
        for row in 0..4 {
            assert!(mask.get(0, row));
            assert!(mask.get(1, row));
            assert!(!mask.get(2, row));
            assert!(!mask.get(3, row));
        }
        assert_eq!(mask.land_cells(), 8);
    }

    #[test]
    fn test_no_polygons_all_ocean() {
        let mask = compute_mask(&[], &grid(4));
        assert_eq!(mask.land_cells(), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let polys = vec![
            Polygon::new(vec![[0.2, 0.2], [1.4, 0.3], [1.1, 1.8], [0.1, 1.2]]).unwrap(),
            Polygon::new(vec![[2.0, 2.0], [2.9, 2.1], [2.5, 2.9]]).unwrap(),
        ];
        let g = grid(17);
        assert_eq!(compute_mask(&polys, &g), compute_mask_parallel(&polys, &g));
    }

    #[test]
    fn test_overlapping_polygons_union() {
        let polys = vec![
            Polygon::new(vec![[-0.1, -0.1], [1.5, -0.1], [1.5, 3.1], [-0.1, 3.1]]).unwrap(),
            Polygon::new(vec![[0.5, -0.1], [2.5, -0.1], [2.5, 3.1], [0.5, 3.1]]).unwrap(),
        ];
        let mask = compute_mask(&polys, &grid(4));
        for row in 0..4 {
            assert!(mask.get(2, row));
            assert!(!mask.get(3, row));
        }
    }
}
