//! Full map composition: gradient fill, isolines, markers, annotations.

use scattered_interp::ScalarField;
use tempmap_common::{region, GridSpec, Sample, StationSet};
use tiny_skia::{IntSize, Pixmap};

use crate::contour::{alert_levels, stroke_levels};
use crate::error::{RenderError, Result};
use crate::gradient;
use crate::markers::{draw_label, draw_station_marker, format_temp, label_width};

/// Presentation tunables for the composed map.
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Pixels per grid cell.
    pub cell_px: usize,
    pub marker_radius: f32,
    pub label_size: f32,
    pub draw_markers: bool,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            cell_px: 2,
            marker_radius: 3.0,
            label_size: 10.0,
            draw_markers: true,
        }
    }
}

impl MapStyle {
    pub fn validate(&self) -> Result<()> {
        if self.cell_px == 0 {
            return Err(RenderError::canvas("cell_px must be at least 1"));
        }
        if !(self.label_size > 0.0) || !(self.marker_radius > 0.0) {
            return Err(RenderError::canvas("marker and label sizes must be positive"));
        }
        Ok(())
    }
}

/// The coldest and hottest real stations, excluding the synthetic corner
/// anchors and stations without a reading.
pub fn extremes(stations: &StationSet) -> Option<(&Sample, &Sample)> {
    let mut min: Option<&Sample> = None;
    let mut max: Option<&Sample> = None;
    for sample in stations.values() {
        if region::is_virtual(&sample.name) {
            continue;
        }
        let Some(value) = sample.reading.value() else {
            continue;
        };
        if min.and_then(|s| s.reading.value()).map_or(true, |m| value < m) {
            min = Some(sample);
        }
        if max.and_then(|s| s.reading.value()).map_or(true, |m| value > m) {
            max = Some(sample);
        }
    }
    Some((min?, max?))
}

/// Render the complete map to PNG bytes.
///
/// `field` is expected to be land-masked already; ocean and out-of-hull
/// cells render white. `caption` is drawn bottom-left with the segment
/// glyph set, so it should be numeric (the observation timestamp).
pub fn render_map(
    grid: &GridSpec,
    field: &ScalarField,
    stations: &StationSet,
    caption: &str,
    style: &MapStyle,
) -> Result<Vec<u8>> {
    style.validate()?;
    let n = field.resolution();
    if n != grid.resolution() {
        return Err(RenderError::canvas(format!(
            "field resolution {n} does not match grid resolution {}",
            grid.resolution()
        )));
    }

    let scale = style.cell_px;
    let side = n * scale;

    // Gradient fill, one colour block per cell, northernmost row on top.
    let mut rgba = vec![0u8; side * side * 4];
    for py in 0..side {
        let row = n - 1 - py / scale;
        for col in 0..n {
            let color = gradient::color_for(field.get(col, row));
            for px in col * scale..(col + 1) * scale {
                let at = (py * side + px) * 4;
                rgba[at..at + 4].copy_from_slice(&color);
            }
        }
    }

    let size = IntSize::from_wh(side as u32, side as u32)
        .ok_or_else(|| RenderError::canvas("zero-sized canvas"))?;
    let mut pixmap = Pixmap::from_vec(rgba, size)
        .ok_or_else(|| RenderError::canvas("pixel buffer does not match canvas size"))?;

    stroke_levels(&mut pixmap, field, &alert_levels(), scale as f32);

    if style.draw_markers {
        draw_stations(&mut pixmap, grid, stations, style, scale);
    }
    draw_annotations(&mut pixmap, stations, caption, style, side);

    tracing::debug!(side, stations = stations.len(), "composed map canvas");
    crate::png::encode_auto(pixmap.data(), side, side)
}

fn draw_stations(
    pixmap: &mut Pixmap,
    grid: &GridSpec,
    stations: &StationSet,
    style: &MapStyle,
    scale: usize,
) {
    let bbox = grid.bbox();
    let n = grid.resolution();
    let top = ((n - 1) * scale) as f32;

    for sample in stations.values() {
        if region::is_virtual(&sample.name) || !bbox.contains_point(sample.lon, sample.lat) {
            continue;
        }
        let Some(value) = sample.reading.value() else {
            continue;
        };

        let fx = (sample.lon - bbox.min_lon) / bbox.width() * (n - 1) as f64;
        let fy = (sample.lat - bbox.min_lat) / bbox.height() * (n - 1) as f64;
        let x = fx as f32 * scale as f32;
        let y = top - fy as f32 * scale as f32;

        draw_station_marker(
            pixmap,
            x,
            y,
            style.marker_radius,
            region::is_highland(&sample.name),
        );
        draw_label(
            pixmap,
            x + style.marker_radius + 2.0,
            y - style.label_size / 2.0,
            &format_temp(value),
            style.label_size,
            [0, 0, 0, 255],
        );
    }
}

fn draw_annotations(
    pixmap: &mut Pixmap,
    stations: &StationSet,
    caption: &str,
    style: &MapStyle,
    side: usize,
) {
    let size = style.label_size;
    let margin = 2.0;

    if !caption.is_empty() {
        draw_label(
            pixmap,
            margin,
            side as f32 - size - margin,
            caption,
            size,
            [0, 0, 0, 255],
        );
    }

    if let Some((coldest, hottest)) = extremes(stations) {
        let min_text = format_temp(coldest.reading.value().unwrap_or(f64::NAN));
        let max_text = format_temp(hottest.reading.value().unwrap_or(f64::NAN));
        draw_label(
            pixmap,
            side as f32 - label_width(&max_text, size) - margin,
            side as f32 - 2.0 * (size + margin),
            &max_text,
            size,
            [255, 0, 0, 255],
        );
        draw_label(
            pixmap,
            side as f32 - label_width(&min_text, size) - margin,
            side as f32 - size - margin,
            &min_text,
            size,
            [0, 0, 255, 255],
        );
    }
}
