//! Bounding box type and operations.

use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};

/// A geographic bounding box in lon/lat degrees (EPSG:4326).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Check the min < max invariant on both axes.
    pub fn validate(&self) -> CommonResult<()> {
        if self.min_lon >= self.max_lon {
            return Err(CommonError::invalid_bounds(format!(
                "min_lon {} >= max_lon {}",
                self.min_lon, self.max_lon
            )));
        }
        if self.min_lat >= self.max_lat {
            return Err(CommonError::invalid_bounds(format!(
                "min_lat {} >= max_lat {}",
                self.min_lat, self.max_lat
            )));
        }
        Ok(())
    }

    /// Width of the bounding box in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the bounding box in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a point is contained within this bbox (boundary inclusive).
    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// The four corners, ordered (min,min), (max,min), (min,max), (max,max).
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.min_lon, self.min_lat),
            (self.max_lon, self.min_lat),
            (self.min_lon, self.max_lat),
            (self.max_lon, self.max_lat),
        ]
    }

    /// Generate a cache key fragment for this bbox (quantized to avoid floating point issues).
    pub fn cache_key(&self) -> String {
        format!(
            "{:.6}_{:.6}_{:.6}_{:.6}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(BoundingBox::new(113.7, 22.1, 114.5, 22.6).validate().is_ok());
        assert!(BoundingBox::new(114.5, 22.1, 113.7, 22.6)
            .validate()
            .is_err());
        assert!(BoundingBox::new(113.7, 22.6, 114.5, 22.6)
            .validate()
            .is_err());
    }

    #[test]
    fn test_corners_order() {
        let bbox = BoundingBox::new(0.0, 10.0, 1.0, 11.0);
        let corners = bbox.corners();
        assert_eq!(corners[0], (0.0, 10.0));
        assert_eq!(corners[1], (1.0, 10.0));
        assert_eq!(corners[2], (0.0, 11.0));
        assert_eq!(corners[3], (1.0, 11.0));
    }

    #[test]
    fn test_contains_point() {
        let bbox = BoundingBox::new(113.7, 22.1, 114.5, 22.6);
        assert!(bbox.contains_point(114.1, 22.3));
        assert!(bbox.contains_point(113.7, 22.1)); // boundary
        assert!(!bbox.contains_point(115.0, 22.3));
    }
}
