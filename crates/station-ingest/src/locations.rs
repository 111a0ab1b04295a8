//! Station location metadata.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::csv::{column_index, split_record, strip_bom};
use crate::error::{IngestError, Result};

const COL_NAME: &str = "AutomaticWeatherStation_en";
const COL_LAT: &str = "GeometryLatitude";
const COL_LON: &str = "GeometryLongitude";

/// Station name to `(lon, lat)` in degrees.
pub type LocationMap = BTreeMap<String, (f64, f64)>;

/// Read the station-location CSV from disk.
pub fn load_locations(path: &Path) -> Result<LocationMap> {
    let text = fs::read_to_string(path)?;
    let locations = parse_locations(&text)?;
    tracing::info!(path = %path.display(), stations = locations.len(), "loaded station locations");
    Ok(locations)
}

/// Parse the station-location CSV.
///
/// Every data row must carry a name and numeric coordinates; the location
/// file is static reference data, so a malformed row is an error rather
/// than something to skip.
pub fn parse_locations(text: &str) -> Result<LocationMap> {
    let mut lines = strip_bom(text).lines().filter(|l| !l.trim().is_empty());
    let header = split_record(lines.next().ok_or_else(|| IngestError::csv("empty file"))?);

    let name_at = column_index(&header, COL_NAME).ok_or(IngestError::MissingColumn(COL_NAME))?;
    let lat_at = column_index(&header, COL_LAT).ok_or(IngestError::MissingColumn(COL_LAT))?;
    let lon_at = column_index(&header, COL_LON).ok_or(IngestError::MissingColumn(COL_LON))?;

    let mut locations = LocationMap::new();
    for (lineno, line) in lines.enumerate() {
        let fields = split_record(line);
        let get = |at: usize| {
            fields
                .get(at)
                .map(|f| f.trim())
                .filter(|f| !f.is_empty())
                .ok_or_else(|| IngestError::csv(format!("row {}: short record", lineno + 2)))
        };
        let name = get(name_at)?;
        let lat: f64 = get(lat_at)?
            .parse()
            .map_err(|_| IngestError::csv(format!("row {}: bad latitude", lineno + 2)))?;
        let lon: f64 = get(lon_at)?
            .parse()
            .map_err(|_| IngestError::csv(format!("row {}: bad longitude", lineno + 2)))?;
        locations.insert(name.to_string(), (lon, lat));
    }

    if locations.is_empty() {
        return Err(IngestError::csv("no station rows"));
    }
    Ok(locations)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{feff}AutomaticWeatherStation_en,GeometryLongitude,GeometryLatitude\n\
        The Peak,114.1497,22.2642\n\
        Ta Kwu Ling,114.1567,22.5286\n";

    #[test]
    fn test_parse_locations() {
        let locations = parse_locations(SAMPLE).unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations["The Peak"], (114.1497, 22.2642));
    }

    #[test]
    fn test_missing_column() {
        let err = parse_locations("Name,Lat\nX,1.0\n").unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn(_)));
    }

    #[test]
    fn test_bad_coordinate_is_error() {
        let text = "AutomaticWeatherStation_en,GeometryLongitude,GeometryLatitude\n\
            The Peak,not-a-number,22.26\n";
        assert!(matches!(parse_locations(text), Err(IngestError::Csv(_))));
    }
}
