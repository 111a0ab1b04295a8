//! Polygon rings and point-in-polygon testing.

use crate::error::{MaskError, Result};

/// A simple polygon given by its exterior ring.
///
/// Vertices are `[lon, lat]`; the ring is treated as implicitly closed, so
/// the last vertex does not need to repeat the first. Winding does not
/// matter for the even-odd containment rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    ring: Vec<[f64; 2]>,
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl Polygon {
    /// Build a polygon from an exterior ring.
    ///
    /// A closing vertex equal to the first is dropped; fewer than three
    /// distinct vertices is an error.
    pub fn new(mut ring: Vec<[f64; 2]>) -> Result<Self> {
        if ring.len() >= 2 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(MaskError::geometry(format!(
                "polygon ring has {} vertices, need at least 3",
                ring.len()
            )));
        }

        let (mut min_lon, mut min_lat) = (f64::INFINITY, f64::INFINITY);
        let (mut max_lon, mut max_lat) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in &ring {
            min_lon = min_lon.min(v[0]);
            min_lat = min_lat.min(v[1]);
            max_lon = max_lon.max(v[0]);
            max_lat = max_lat.max(v[1]);
        }

        Ok(Self {
            ring,
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// The exterior ring vertices.
    pub fn ring(&self) -> &[[f64; 2]] {
        &self.ring
    }

    /// Even-odd (ray casting) containment test.
    ///
    /// Points outside the bounding rectangle are rejected without touching
    /// the ring, which is what makes the dense grid scan cheap over coastal
    /// geometry with many small islands.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        if lon < self.min_lon || lon > self.max_lon || lat < self.min_lat || lat > self.max_lat {
            return false;
        }

        let n = self.ring.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let [xi, yi] = self.ring[i];
            let [xj, yj] = self.ring[j];
            // Half-open rule on the edge's latitude span keeps vertices from
            // being counted twice.
            if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}
