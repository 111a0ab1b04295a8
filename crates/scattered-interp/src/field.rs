//! Dense scalar field aligned to a grid.

use tempmap_common::GridSpec;

/// A dense square field of interpolated values in row-major order.
///
/// `NaN` marks a no-data cell (outside the convex hull of the samples, or
/// masked out by the caller).
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    data: Vec<f64>,
    resolution: usize,
}

impl ScalarField {
    /// Create a field of the grid's size with every cell no-data.
    pub fn no_data(grid: &GridSpec) -> Self {
        Self {
            data: vec![f64::NAN; grid.len()],
            resolution: grid.resolution(),
        }
    }

    /// Wrap existing row-major values. Panics if the length is not n*n.
    pub fn from_values(resolution: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), resolution * resolution);
        Self { data, resolution }
    }

    /// Points per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Row-major values.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Value at `(col, row)`.
    pub fn get(&self, col: usize, row: usize) -> f64 {
        self.data[row * self.resolution + col]
    }

    /// Set the value at `(col, row)`.
    pub fn set(&mut self, col: usize, row: usize, value: f64) {
        self.data[row * self.resolution + col] = value;
    }

    /// True when every cell is no-data.
    pub fn is_all_no_data(&self) -> bool {
        self.data.iter().all(|v| v.is_nan())
    }

    /// Minimum over defined cells, or `None` when the field is all no-data.
    pub fn min(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.min(v))))
    }

    /// Maximum over defined cells, or `None` when the field is all no-data.
    pub fn max(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }

    /// A copy with cells set to no-data wherever `keep` is false.
    ///
    /// `keep` must be row-major with the same dimensions as the field; this
    /// is how the land mask is applied before rendering.
    pub fn masked(&self, keep: &[bool]) -> ScalarField {
        assert_eq!(keep.len(), self.data.len());
        let data = self
            .data
            .iter()
            .zip(keep)
            .map(|(&v, &k)| if k { v } else { f64::NAN })
            .collect();
        Self {
            data,
            resolution: self.resolution,
        }
    }
}
