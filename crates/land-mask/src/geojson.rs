//! Loading land polygons from GeoJSON.
//!
//! Only exterior rings are used; holes (inner rings) in coastline data at
//! map scale are below grid resolution and are ignored.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{MaskError, Result};
use crate::polygon::Polygon;

/// Read a GeoJSON file and collect every polygon exterior ring.
pub fn load_polygons(path: &Path) -> Result<Vec<Polygon>> {
    let text = fs::read_to_string(path)?;
    let polygons = parse_polygons(&text)?;
    tracing::debug!(path = %path.display(), count = polygons.len(), "loaded land polygons");
    Ok(polygons)
}

/// Parse GeoJSON text into polygons.
///
/// Accepts a `FeatureCollection`, a single `Feature`, or a bare geometry;
/// `Polygon` and `MultiPolygon` geometries contribute rings, other geometry
/// types are skipped.
pub fn parse_polygons(text: &str) -> Result<Vec<Polygon>> {
    let root: Value = serde_json::from_str(text)?;
    let mut polygons = Vec::new();
    collect(&root, &mut polygons)?;
    if polygons.is_empty() {
        return Err(MaskError::geometry("no polygon geometry found"));
    }
    Ok(polygons)
}

fn collect(value: &Value, out: &mut Vec<Polygon>) -> Result<()> {
    match value.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {
            for feature in value
                .get("features")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default()
            {
                collect(feature, out)?;
            }
        }
        Some("Feature") => {
            if let Some(geometry) = value.get("geometry") {
                if !geometry.is_null() {
                    collect(geometry, out)?;
                }
            }
        }
        Some("Polygon") => {
            if let Some(rings) = value.get("coordinates").and_then(Value::as_array) {
                push_exterior(rings, out)?;
            }
        }
        Some("MultiPolygon") => {
            for rings in value
                .get("coordinates")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default()
            {
                if let Some(rings) = rings.as_array() {
                    push_exterior(rings, out)?;
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn push_exterior(rings: &[Value], out: &mut Vec<Polygon>) -> Result<()> {
    let Some(exterior) = rings.first().and_then(Value::as_array) else {
        return Ok(());
    };
    let mut ring = Vec::with_capacity(exterior.len());
    for pos in exterior {
        let coords = pos
            .as_array()
            .filter(|c| c.len() >= 2)
            .ok_or_else(|| MaskError::geometry("ring position is not a [lon, lat] pair"))?;
        let lon = coords[0]
            .as_f64()
            .ok_or_else(|| MaskError::geometry("non-numeric longitude"))?;
        let lat = coords[1]
            .as_f64()
            .ok_or_else(|| MaskError::geometry("non-numeric latitude"))?;
        ring.push([lon, lat]);
    }
    out.push(Polygon::new(ring)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_collection() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "islet"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [0.5, 1.0], [0.0, 0.0]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [[[2.0, 2.0], [3.0, 2.0], [2.5, 3.0], [2.0, 2.0]]],
                            [[[5.0, 5.0], [6.0, 5.0], [5.5, 6.0], [5.0, 5.0]]]
                        ]
                    }
                }
            ]
        }"#;
        let polygons = parse_polygons(text).unwrap();
        assert_eq!(polygons.len(), 3);
        assert!(polygons[0].contains(0.5, 0.3));
        assert!(polygons[2].contains(5.5, 5.3));
    }

    #[test]
    fn test_bare_polygon_geometry() {
        let text = r#"{"type": "Polygon", "coordinates": [[[0,0],[2,0],[1,2],[0,0]]]}"#;
        let polygons = parse_polygons(text).unwrap();
        assert_eq!(polygons.len(), 1);
    }

    #[test]
    fn test_point_features_yield_no_polygons() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
            }]
        }"#;
        assert!(matches!(
            parse_polygons(text),
            Err(MaskError::Geometry(_))
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_polygons("{not json"),
            Err(MaskError::GeoJson(_))
        ));
    }
}
