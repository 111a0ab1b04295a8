//! Isoline extraction (marching squares) and stroking.
//!
//! Alert-level isolines are drawn on top of the gradient fill at the
//! configured temperature thresholds; cells touching no-data are skipped so
//! lines stop cleanly at the coastline.

use scattered_interp::ScalarField;
use tempmap_common::region;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::gradient::Rgba;

/// An isoline level with its stroke styling.
#[derive(Debug, Clone, Copy)]
pub struct LevelStyle {
    pub level: f64,
    pub color: Rgba,
    pub width: f32,
}

/// The fixed alert levels, coldest first.
pub fn alert_levels() -> Vec<LevelStyle> {
    vec![
        LevelStyle {
            level: region::FREEZING_LEVEL,
            color: [255, 0, 255, 255],
            width: 1.0,
        },
        LevelStyle {
            level: region::VERY_COLD_LEVEL,
            color: [211, 211, 211, 255],
            width: 1.0,
        },
        LevelStyle {
            level: region::COLD_LEVEL,
            color: [255, 255, 255, 255],
            width: 1.0,
        },
        LevelStyle {
            level: region::VERY_HOT_LEVEL,
            color: [255, 255, 255, 255],
            width: 1.0,
        },
        LevelStyle {
            level: region::EXTREME_HOT_LEVEL,
            color: [255, 0, 255, 255],
            width: 1.0,
        },
    ]
}

/// A line segment in fractional grid-cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: (f32, f32),
    pub b: (f32, f32),
}

/// Where `level` crosses the edge between two corner values.
fn edge_crossing(p1: (f32, f32), p2: (f32, f32), v1: f64, v2: f64, level: f64) -> (f32, f32) {
    if (v2 - v1).abs() < 1e-9 {
        return ((p1.0 + p2.0) / 2.0, (p1.1 + p2.1) / 2.0);
    }
    let t = (((level - v1) / (v2 - v1)).clamp(0.0, 1.0)) as f32;
    (p1.0 + t * (p2.0 - p1.0), p1.1 + t * (p2.1 - p1.1))
}

/// Extract the isoline segments for a single level.
pub fn trace_level(field: &ScalarField, level: f64) -> Vec<Segment> {
    let n = field.resolution();
    if n < 2 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    for row in 0..n - 1 {
        for col in 0..n - 1 {
            let bl = field.get(col, row);
            let br = field.get(col + 1, row);
            let tl = field.get(col, row + 1);
            let tr = field.get(col + 1, row + 1);
            if bl.is_nan() || br.is_nan() || tl.is_nan() || tr.is_nan() {
                continue;
            }

            let mut case = 0u8;
            if bl >= level {
                case |= 1;
            }
            if br >= level {
                case |= 2;
            }
            if tr >= level {
                case |= 4;
            }
            if tl >= level {
                case |= 8;
            }
            if case == 0 || case == 15 {
                continue;
            }

            let x = col as f32;
            let y = row as f32;
            let bottom = edge_crossing((x, y), (x + 1.0, y), bl, br, level);
            let right = edge_crossing((x + 1.0, y), (x + 1.0, y + 1.0), br, tr, level);
            let top = edge_crossing((x, y + 1.0), (x + 1.0, y + 1.0), tl, tr, level);
            let left = edge_crossing((x, y), (x, y + 1.0), bl, tl, level);

            let pairs: &[(_, _)] = match case {
                1 | 14 => &[(left, bottom)],
                2 | 13 => &[(bottom, right)],
                3 | 12 => &[(left, right)],
                4 | 11 => &[(right, top)],
                6 | 9 => &[(bottom, top)],
                7 | 8 => &[(left, top)],
                // saddles: two independent crossings
                5 => &[(left, bottom), (right, top)],
                10 => &[(bottom, right), (left, top)],
                _ => &[],
            };
            for &(a, b) in pairs {
                segments.push(Segment { a, b });
            }
        }
    }
    segments
}

/// Stroke the alert-level isolines onto the canvas.
///
/// `scale` is pixels per grid cell; rows are flipped so the northernmost
/// row lands at the top of the image.
pub fn stroke_levels(pixmap: &mut Pixmap, field: &ScalarField, styles: &[LevelStyle], scale: f32) {
    let top_row = (field.resolution() - 1) as f32;

    for style in styles {
        let segments = trace_level(field, style.level);
        if segments.is_empty() {
            continue;
        }
        tracing::debug!(level = style.level, count = segments.len(), "stroking isoline");

        let mut paint = Paint::default();
        paint.set_color_rgba8(style.color[0], style.color[1], style.color[2], style.color[3]);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: style.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        let mut pb = PathBuilder::new();
        for seg in &segments {
            pb.move_to(seg.a.0 * scale, (top_row - seg.a.1) * scale);
            pb.line_to(seg.b.0 * scale, (top_row - seg.b.1) * scale);
        }
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_field_has_no_isolines() {
        let field = ScalarField::from_values(3, vec![5.0; 9]);
        assert!(trace_level(&field, 5.0).is_empty());
    }

    #[test]
    fn test_peak_produces_closed_ring_segments() {
        let field = ScalarField::from_values(
            3,
            vec![0.0, 0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0, 0.0],
        );
        let segments = trace_level(&field, 5.0);
        // one crossing segment in each of the four cells around the peak
        assert_eq!(segments.len(), 4);
    }

    #[test]
    fn test_no_data_cells_skipped() {
        let field = ScalarField::from_values(
            3,
            vec![0.0, 0.0, f64::NAN, 0.0, 10.0, f64::NAN, 0.0, 0.0, 0.0],
        );
        let segments = trace_level(&field, 5.0);
        // the two right-hand cells touch NaN and contribute nothing
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_crossing_position_interpolated() {
        let p = edge_crossing((0.0, 0.0), (1.0, 0.0), 0.0, 10.0, 5.0);
        assert!((p.0 - 0.5).abs() < 1e-6);
        assert_eq!(p.1, 0.0);
    }

    #[test]
    fn test_alert_levels_match_thresholds() {
        let levels: Vec<f64> = alert_levels().iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![0.0, 8.0, 12.0, 33.0, 35.0]);
    }
}
