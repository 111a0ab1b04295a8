//! Common types and constants shared across the temperature map pipeline.

pub mod bbox;
pub mod error;
pub mod grid;
pub mod region;
pub mod station;

pub use bbox::BoundingBox;
pub use error::{CommonError, CommonResult};
pub use grid::{GridPoint, GridSpec};
pub use station::{Reading, Sample, StationSet};
