//! The observatory 1-minute temperature feed.

use chrono::NaiveDateTime;
use tempmap_common::{Sample, StationSet};

use crate::csv::{column_index, split_record, strip_bom};
use crate::error::{IngestError, Result};
use crate::locations::LocationMap;

const COL_TIME: &str = "Date time";
const COL_NAME: &str = "Automatic Weather Station";
const COL_TEMP: &str = "Air Temperature(degree Celsius)";

/// Timestamp layout used by the feed, local observatory time.
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

/// One parsed snapshot of the feed.
#[derive(Debug, Clone)]
pub struct Observations {
    /// Every located station, including those with a missing reading.
    pub stations: StationSet,
    /// Raw feed timestamp, `yyyymmddHHMM`.
    pub timestamp: String,
}

impl Observations {
    /// The observation time, if the feed timestamp parses.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// Parse the feed against the known station locations.
///
/// An unparsable temperature becomes an explicit [`tempmap_common::Reading::Missing`]
/// sample rather than being dropped or guessed; a row naming a station
/// absent from the location file is logged and skipped because it cannot
/// be placed on the map.
pub fn parse_readings(text: &str, locations: &LocationMap) -> Result<Observations> {
    let mut lines = strip_bom(text).lines().filter(|l| !l.trim().is_empty());
    let header = split_record(lines.next().ok_or_else(|| IngestError::csv("empty feed"))?);

    let time_at = column_index(&header, COL_TIME).ok_or(IngestError::MissingColumn(COL_TIME))?;
    let name_at = column_index(&header, COL_NAME).ok_or(IngestError::MissingColumn(COL_NAME))?;
    let temp_at = column_index(&header, COL_TEMP).ok_or(IngestError::MissingColumn(COL_TEMP))?;

    let mut stations = StationSet::new();
    let mut timestamp = String::new();
    let mut skipped = 0usize;

    for line in lines {
        let fields = split_record(line);
        let field = |at: usize| fields.get(at).map(|f| f.trim()).unwrap_or("");

        if !field(time_at).is_empty() {
            timestamp = field(time_at).to_string();
        }

        let name = field(name_at);
        let Some(&(lon, lat)) = locations.get(name) else {
            tracing::warn!(station = name, "reading for unknown station, skipping");
            skipped += 1;
            continue;
        };

        let sample = match field(temp_at).parse::<f64>() {
            Ok(temp) => Sample::observed(name, lon, lat, temp),
            Err(_) => {
                tracing::debug!(station = name, raw = field(temp_at), "unreadable temperature");
                Sample::missing(name, lon, lat)
            }
        };
        stations.insert(name.to_string(), sample);
    }

    if stations.is_empty() {
        return Err(IngestError::csv("feed contains no known stations"));
    }
    if timestamp.is_empty() {
        return Err(IngestError::csv("feed carries no timestamp"));
    }

    tracing::info!(
        stations = stations.len(),
        skipped,
        %timestamp,
        "parsed temperature feed"
    );
    Ok(Observations {
        stations,
        timestamp,
    })
}
