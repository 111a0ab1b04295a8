//! Discrete temperature colour gradient.
//!
//! Temperatures are quantised to whole degrees over the display range
//! before colour lookup, so a rendered field uses at most one colour per
//! degree and the fill stays within an indexed PNG palette.

use tempmap_common::region::{MAX_TEMP, MIN_TEMP};

/// RGBA colour.
pub type Rgba = [u8; 4];

/// Ocean / no-data fill.
pub const NO_DATA_COLOR: Rgba = [255, 255, 255, 255];

/// Spectral anchor stops, cold to hot, evenly spaced over the display range.
const STOPS: [[u8; 3]; 9] = [
    [84, 48, 180],   // deep violet-blue
    [50, 104, 230],  // blue
    [64, 174, 228],  // light blue
    [120, 210, 180], // blue-green
    [190, 225, 120], // green-yellow
    [250, 230, 90],  // yellow
    [250, 170, 64],  // orange
    [235, 95, 50],   // red-orange
    [170, 30, 40],   // dark red
];

/// Colour for a temperature, clamped to the display range.
///
/// `NaN` maps to [`NO_DATA_COLOR`].
pub fn color_for(temp: f64) -> Rgba {
    if temp.is_nan() {
        return NO_DATA_COLOR;
    }
    // quantise to the containing whole-degree band
    let band = temp.clamp(MIN_TEMP, MAX_TEMP).floor();
    let t = (band - MIN_TEMP) / (MAX_TEMP - MIN_TEMP);

    let scaled = t * (STOPS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(STOPS.len() - 2);
    let frac = scaled - i as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    [
        lerp(STOPS[i][0], STOPS[i + 1][0]),
        lerp(STOPS[i][1], STOPS[i + 1][1]),
        lerp(STOPS[i][2], STOPS[i + 1][2]),
        255,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_no_data() {
        assert_eq!(color_for(f64::NAN), NO_DATA_COLOR);
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(color_for(-100.0), color_for(MIN_TEMP));
        assert_eq!(color_for(100.0), color_for(MAX_TEMP));
    }

    #[test]
    fn test_quantised_within_degree() {
        // everything inside one degree band shares a colour
        assert_eq!(color_for(20.0), color_for(20.4));
        assert_eq!(color_for(20.0), color_for(20.99));
        assert_ne!(color_for(20.0), color_for(21.0));
    }

    #[test]
    fn test_bounded_palette() {
        let mut colors = std::collections::BTreeSet::new();
        let mut t = MIN_TEMP;
        while t <= MAX_TEMP {
            colors.insert(color_for(t));
            t += 0.25;
        }
        // one colour per whole degree plus the endpoint band
        assert!(colors.len() <= (MAX_TEMP - MIN_TEMP) as usize + 1);
    }

    #[test]
    fn test_cold_is_blue_hot_is_red() {
        let cold = color_for(MIN_TEMP);
        let hot = color_for(MAX_TEMP);
        assert!(cold[2] > cold[0], "cold end should lean blue: {cold:?}");
        assert!(hot[0] > hot[2], "hot end should lean red: {hot:?}");
    }
}
