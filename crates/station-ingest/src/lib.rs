//! Ingestion of station metadata and live temperature readings.
//!
//! Two inputs feed the map pipeline: a static station-location CSV and the
//! observatory's 1-minute temperature feed. Both are parsed into the shared
//! station mapping, with unreadable temperatures kept as explicit missing
//! readings so downstream stages can account for them.

pub mod csv;
pub mod error;
pub mod fetch;
pub mod locations;
pub mod readings;

pub use error::{IngestError, Result};
pub use fetch::{fetch_feed, DEFAULT_FEED_URL, DEFAULT_TIMEOUT};
pub use locations::{load_locations, parse_locations, LocationMap};
pub use readings::{parse_readings, Observations};
