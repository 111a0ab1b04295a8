//! Rendering of interpolated temperature fields to PNG maps.
//!
//! The composed map layers a discrete temperature gradient fill, alert
//! isolines, station markers with numeric labels, and min/max/timestamp
//! annotations, then encodes to PNG (indexed when the palette fits).

pub mod compose;
pub mod contour;
pub mod error;
pub mod gradient;
pub mod markers;
pub mod png;

pub use compose::{extremes, render_map, MapStyle};
pub use contour::{alert_levels, trace_level, LevelStyle};
pub use error::{RenderError, Result};
pub use gradient::{color_for, Rgba, NO_DATA_COLOR};
