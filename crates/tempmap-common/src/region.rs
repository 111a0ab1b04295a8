//! Fixed deployment-region constants.
//!
//! The pipeline renders one fixed region; these values are deliberately
//! constants rather than configuration (see the non-goals of the project).

use crate::bbox::BoundingBox;

/// Deployment region: Hong Kong and surrounding waters.
pub const REGION_BBOX: BoundingBox = BoundingBox {
    min_lon: 113.7,
    min_lat: 22.1,
    max_lon: 114.5,
    max_lat: 22.6,
};

/// Grid resolution for the quick map variant.
pub const RESOLUTION_QUICK: usize = 100;

/// Grid resolution for the refined map variant.
pub const RESOLUTION_REFINED: usize = 400;

/// Lower bound of the colour scale in deg C.
pub const MIN_TEMP: f64 = -2.0;

/// Upper bound of the colour scale in deg C.
pub const MAX_TEMP: f64 = 40.0;

/// Highlighted contour levels in deg C: freezing, very cold, cold,
/// very hot, extremely hot warning thresholds.
pub const FREEZING_LEVEL: f64 = 0.0;
pub const VERY_COLD_LEVEL: f64 = 8.0;
pub const COLD_LEVEL: f64 = 12.0;
pub const VERY_HOT_LEVEL: f64 = 33.0;
pub const EXTREME_HOT_LEVEL: f64 = 35.0;

/// Stations sited on high ground, drawn with a triangle marker.
pub const HIGHLAND_STATIONS: [&str; 4] = ["The Peak", "Tai Mo Shan", "Ngong Ping", "Tate's Cairn"];

/// Names assigned to the synthetic corner anchors, in bbox corner order.
pub const VIRTUAL_STATION_NAMES: [&str; 4] = ["Station 1", "Station 2", "Station 3", "Station 4"];

/// True when a station name belongs to the highland set.
pub fn is_highland(name: &str) -> bool {
    HIGHLAND_STATIONS.contains(&name)
}

/// True when a station name is one of the synthetic corner anchors.
pub fn is_virtual(name: &str) -> bool {
    VIRTUAL_STATION_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_bbox_valid() {
        assert!(REGION_BBOX.validate().is_ok());
    }

    #[test]
    fn test_station_categories() {
        assert!(is_highland("Tai Mo Shan"));
        assert!(!is_highland("Tuen Mun"));
        assert!(is_virtual("Station 3"));
        assert!(!is_virtual("The Peak"));
    }
}
