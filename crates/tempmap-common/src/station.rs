//! Station samples: a named location with an observed or missing reading.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A scalar reading at a station.
///
/// `Missing` is an explicit marker, never a sentinel number: samples whose
/// reading is missing are filtered before interpolation and contribute to
/// nothing, including the corner-anchor mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Reading {
    /// Observed air temperature in deg C.
    Observed(f64),
    /// No usable reading for this station in the current cycle.
    Missing,
}

impl Reading {
    /// The observed value, or `None` when missing.
    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Observed(v) => Some(*v),
            Reading::Missing => None,
        }
    }

    /// True when a value was observed.
    pub fn is_observed(&self) -> bool {
        matches!(self, Reading::Observed(_))
    }
}

/// A geolocated station sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Station name, unique within a request.
    pub name: String,
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Current reading.
    pub reading: Reading,
}

impl Sample {
    /// Create a sample with an observed value.
    pub fn observed(name: impl Into<String>, lon: f64, lat: f64, value: f64) -> Self {
        Self {
            name: name.into(),
            lon,
            lat,
            reading: Reading::Observed(value),
        }
    }

    /// Create a sample with a missing reading.
    pub fn missing(name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            name: name.into(),
            lon,
            lat,
            reading: Reading::Missing,
        }
    }
}

/// Station samples keyed by unique name.
///
/// A `BTreeMap` keeps iteration order deterministic, which in turn keeps
/// triangulation insertion order (and therefore tie-breaking on degenerate
/// geometry) reproducible across runs.
pub type StationSet = BTreeMap<String, Sample>;

/// Collect the samples that carry an observed value.
pub fn valid_samples(stations: &StationSet) -> Vec<&Sample> {
    stations
        .values()
        .filter(|s| s.reading.is_observed())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_value() {
        assert_eq!(Reading::Observed(21.5).value(), Some(21.5));
        assert_eq!(Reading::Missing.value(), None);
    }

    #[test]
    fn test_valid_samples_filters_missing() {
        let mut stations = StationSet::new();
        stations.insert(
            "A".into(),
            Sample::observed("A", 114.0, 22.3, 20.0),
        );
        stations.insert("B".into(), Sample::missing("B", 114.1, 22.4));

        let valid = valid_samples(&stations);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].name, "A");
    }
}
