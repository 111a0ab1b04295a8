//! Station markers and segment-style numeric labels.
//!
//! Labels are limited to digits, minus and the decimal point, drawn as
//! stroked seven-segment style glyphs. That covers temperatures and
//! timestamp captions without pulling in font rasterisation.

use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::gradient::Rgba;

type UnitSegment = ((f32, f32), (f32, f32));

/// Glyph strokes in a unit box, x and y in [-0.5, 0.5], y growing downward.
fn glyph_segments(ch: char) -> &'static [UnitSegment] {
    const TOP: UnitSegment = ((-0.5, -0.5), (0.5, -0.5));
    const BOTTOM: UnitSegment = ((-0.5, 0.5), (0.5, 0.5));
    const MIDDLE: UnitSegment = ((-0.5, 0.0), (0.5, 0.0));
    const LEFT_UP: UnitSegment = ((-0.5, -0.5), (-0.5, 0.0));
    const LEFT_DOWN: UnitSegment = ((-0.5, 0.0), (-0.5, 0.5));
    const RIGHT_UP: UnitSegment = ((0.5, -0.5), (0.5, 0.0));
    const RIGHT_DOWN: UnitSegment = ((0.5, 0.0), (0.5, 0.5));

    match ch {
        '0' => &[TOP, RIGHT_UP, RIGHT_DOWN, BOTTOM, LEFT_DOWN, LEFT_UP],
        '1' => &[((0.0, -0.5), (0.0, 0.5))],
        '2' => &[TOP, RIGHT_UP, MIDDLE, LEFT_DOWN, BOTTOM],
        '3' => &[TOP, RIGHT_UP, MIDDLE, RIGHT_DOWN, BOTTOM],
        '4' => &[LEFT_UP, MIDDLE, RIGHT_UP, RIGHT_DOWN],
        '5' => &[TOP, LEFT_UP, MIDDLE, RIGHT_DOWN, BOTTOM],
        '6' => &[TOP, LEFT_UP, LEFT_DOWN, BOTTOM, RIGHT_DOWN, MIDDLE],
        '7' => &[TOP, ((0.5, -0.5), (0.0, 0.5))],
        '8' => &[TOP, BOTTOM, MIDDLE, LEFT_UP, LEFT_DOWN, RIGHT_UP, RIGHT_DOWN],
        '9' => &[MIDDLE, LEFT_UP, TOP, RIGHT_UP, RIGHT_DOWN, BOTTOM],
        '-' => &[MIDDLE],
        '.' => &[((0.0, 0.4), (0.0, 0.5))],
        _ => &[],
    }
}

/// Stroke a numeric label with its top-left corner at `(x, y)`.
///
/// Unsupported characters occupy space but draw nothing.
pub fn draw_label(pixmap: &mut Pixmap, x: f32, y: f32, text: &str, size: f32, color: Rgba) {
    let glyph_w = size * 0.6;
    let advance = glyph_w + size * 0.2;

    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: (size * 0.12).max(1.0),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    let mut pb = PathBuilder::new();
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as f32 * advance + glyph_w / 2.0;
        let cy = y + size / 2.0;
        for &((ux1, uy1), (ux2, uy2)) in glyph_segments(ch) {
            pb.move_to(cx + ux1 * glyph_w, cy + uy1 * size);
            pb.line_to(cx + ux2 * glyph_w, cy + uy2 * size);
        }
    }
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Pixel width of a label drawn at `size`.
pub fn label_width(text: &str, size: f32) -> f32 {
    let advance = size * 0.6 + size * 0.2;
    text.chars().count() as f32 * advance
}

/// Draw a station marker: a green upward triangle for highland stations,
/// a black dot otherwise.
pub fn draw_station_marker(pixmap: &mut Pixmap, x: f32, y: f32, radius: f32, highland: bool) {
    let mut paint = Paint::default();
    paint.anti_alias = true;

    let mut pb = PathBuilder::new();
    if highland {
        paint.set_color_rgba8(0, 128, 0, 255);
        pb.move_to(x, y - radius);
        pb.line_to(x - radius, y + radius);
        pb.line_to(x + radius, y + radius);
        pb.close();
    } else {
        paint.set_color_rgba8(0, 0, 0, 255);
        pb.push_circle(x, y, radius);
    }
    if let Some(path) = pb.finish() {
        pixmap.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

/// Temperature text for a label, one decimal place.
pub fn format_temp(temp: f64) -> String {
    format!("{temp:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_numeric_char_has_a_glyph() {
        for ch in "0123456789-.".chars() {
            assert!(!glyph_segments(ch).is_empty(), "no glyph for {ch:?}");
        }
        assert!(glyph_segments('x').is_empty());
    }

    #[test]
    fn test_format_temp() {
        assert_eq!(format_temp(23.45), "23.5");
        assert_eq!(format_temp(-1.0), "-1.0");
        assert_eq!(format_temp(8.0), "8.0");
    }

    #[test]
    fn test_label_draws_pixels() {
        let mut pixmap = Pixmap::new(64, 24).unwrap();
        draw_label(&mut pixmap, 2.0, 2.0, "-12.5", 16.0, [0, 0, 0, 255]);
        assert!(pixmap.data().iter().any(|&b| b != 0));
    }

    #[test]
    fn test_markers_draw_pixels() {
        let mut pixmap = Pixmap::new(32, 32).unwrap();
        draw_station_marker(&mut pixmap, 8.0, 8.0, 3.0, false);
        draw_station_marker(&mut pixmap, 24.0, 24.0, 3.0, true);
        assert!(pixmap.data().iter().any(|&b| b != 0));
    }
}
