//! Grid interpolation of station readings.

use tempmap_common::{region, BoundingBox, GridSpec, Sample, StationSet};

use crate::delaunay::Triangulation;
use crate::error::{InterpError, Result};
use crate::field::ScalarField;

/// Minimum number of valid samples for a non-degenerate scattered
/// interpolation.
const MIN_VALID_SAMPLES: usize = 3;

/// Interpolation method for the scattered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMethod {
    /// Linear barycentric interpolation over the Delaunay triangulation.
    Linear,
    /// Value of the nearest sample.
    Nearest,
    /// Gradient-estimated cubic blend over the Delaunay triangulation.
    Cubic,
}

impl Default for InterpolationMethod {
    fn default() -> Self {
        Self::Linear
    }
}

impl std::str::FromStr for InterpolationMethod {
    type Err = InterpError;

    /// Parse a method name, case-insensitively. Unknown names are an
    /// error, never a silent default.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "nearest" => Ok(Self::Nearest),
            "cubic" => Ok(Self::Cubic),
            _ => Err(InterpError::UnknownMethod(s.to_string())),
        }
    }
}

impl InterpolationMethod {
    /// Get the method name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Nearest => "nearest",
            Self::Cubic => "cubic",
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synthesize the four virtual boundary stations at the bbox corners,
/// each carrying the mean of the valid readings.
///
/// The anchors condition extrapolation near the map edges; they are an
/// approximation, not a measurement, and are excluded from extremum
/// reporting downstream.
pub fn corner_anchors(bbox: BoundingBox, mean_value: f64) -> Vec<Sample> {
    bbox.corners()
        .iter()
        .zip(region::VIRTUAL_STATION_NAMES)
        .map(|(&(lon, lat), name)| Sample::observed(name, lon, lat, mean_value))
        .collect()
}

/// Interpolate station readings onto a dense `resolution` x `resolution`
/// grid over `bbox`.
///
/// Samples with a missing reading are excluded entirely: they contribute
/// neither to the triangulation nor to the corner-anchor mean. Fewer than
/// three valid samples is an error; degenerate (collinear) geometry is
/// not, and surfaces as an all-no-data field for the caller to render
/// blank.
pub fn interpolate(
    stations: &StationSet,
    bbox: BoundingBox,
    resolution: usize,
    method: InterpolationMethod,
) -> Result<(GridSpec, ScalarField)> {
    let valid = tempmap_common::station::valid_samples(stations);
    if valid.len() < MIN_VALID_SAMPLES {
        return Err(InterpError::insufficient(valid.len(), MIN_VALID_SAMPLES));
    }

    let mean_value = valid
        .iter()
        .filter_map(|s| s.reading.value())
        .sum::<f64>()
        / valid.len() as f64;

    // Augmented sample set: real stations plus the four corner anchors.
    let mut points: Vec<[f64; 2]> = Vec::with_capacity(valid.len() + 4);
    let mut values: Vec<f64> = Vec::with_capacity(valid.len() + 4);
    for s in &valid {
        points.push([s.lon, s.lat]);
        values.push(s.reading.value().unwrap_or(f64::NAN));
    }
    for anchor in corner_anchors(bbox, mean_value) {
        points.push([anchor.lon, anchor.lat]);
        values.push(mean_value);
    }

    let grid = GridSpec::new(bbox, resolution)?;

    tracing::debug!(
        valid_samples = valid.len(),
        mean_value,
        resolution,
        method = method.as_str(),
        "interpolating station readings"
    );

    let field = match method {
        InterpolationMethod::Linear => linear_field(&grid, &points, &values),
        InterpolationMethod::Nearest => nearest_field(&grid, &points, &values),
        InterpolationMethod::Cubic => cubic_field(&grid, &points, &values),
    };

    if field.is_all_no_data() {
        tracing::warn!("degenerate sample geometry produced an all-no-data field");
    }

    Ok((grid, field))
}

fn linear_field(grid: &GridSpec, points: &[[f64; 2]], values: &[f64]) -> ScalarField {
    let tri = Triangulation::build(points);
    let mut field = ScalarField::no_data(grid);
    if tri.is_empty() {
        return field;
    }

    let mut hint = None;
    for row in 0..grid.resolution() {
        for col in 0..grid.resolution() {
            let p = [grid.lon(col), grid.lat(row)];
            if let Some((t, l)) = tri.locate(p, hint) {
                hint = Some(t);
                let [a, b, c] = tri.triangles()[t];
                field.set(col, row, l[0] * values[a] + l[1] * values[b] + l[2] * values[c]);
            }
        }
    }
    field
}

fn nearest_field(grid: &GridSpec, points: &[[f64; 2]], values: &[f64]) -> ScalarField {
    let mut field = ScalarField::no_data(grid);
    for row in 0..grid.resolution() {
        for col in 0..grid.resolution() {
            let lon = grid.lon(col);
            let lat = grid.lat(row);
            let mut best = 0;
            let mut best_d2 = f64::INFINITY;
            for (i, p) in points.iter().enumerate() {
                let dx = p[0] - lon;
                let dy = p[1] - lat;
                let d2 = dx * dx + dy * dy;
                if d2 < best_d2 {
                    best_d2 = d2;
                    best = i;
                }
            }
            field.set(col, row, values[best]);
        }
    }
    field
}

/// Cubic variant: per-vertex gradients estimated by least squares over the
/// triangulation neighbours, blended with a smoothstep weight so the surface
/// interpolates the samples with continuous slope across edges.
fn cubic_field(grid: &GridSpec, points: &[[f64; 2]], values: &[f64]) -> ScalarField {
    let tri = Triangulation::build(points);
    let mut field = ScalarField::no_data(grid);
    if tri.is_empty() {
        return field;
    }

    let grads = estimate_gradients(&tri, values);

    let mut hint = None;
    for row in 0..grid.resolution() {
        for col in 0..grid.resolution() {
            let p = [grid.lon(col), grid.lat(row)];
            if let Some((t, l)) = tri.locate(p, hint) {
                hint = Some(t);
                let verts = tri.triangles()[t];
                let mut num = 0.0;
                let mut den = 0.0;
                for (slot, &v) in verts.iter().enumerate() {
                    let lv = l[slot].clamp(0.0, 1.0);
                    // Hermite extension of vertex v evaluated at p.
                    let h = values[v]
                        + grads[v][0] * (p[0] - tri.points()[v][0])
                        + grads[v][1] * (p[1] - tri.points()[v][1]);
                    let w = lv * lv * (3.0 - 2.0 * lv);
                    num += w * h;
                    den += w;
                }
                if den > 0.0 {
                    field.set(col, row, num / den);
                }
            }
        }
    }
    field
}

/// Per-vertex gradient by least-squares fit of value differences to the
/// incident edges. Falls back to a zero gradient when the neighbourhood is
/// rank-deficient.
fn estimate_gradients(tri: &Triangulation, values: &[f64]) -> Vec<[f64; 2]> {
    let adj = tri.neighbors();
    let mut grads = vec![[0.0f64; 2]; tri.points().len()];

    for (i, ns) in adj.iter().enumerate() {
        let pi = tri.points()[i];
        let (mut sxx, mut sxy, mut syy, mut sxv, mut syv) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for &j in ns {
            let dx = tri.points()[j][0] - pi[0];
            let dy = tri.points()[j][1] - pi[1];
            let dv = values[j] - values[i];
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
            sxv += dx * dv;
            syv += dy * dv;
        }
        let det = sxx * syy - sxy * sxy;
        if det.abs() > 1e-12 {
            grads[i] = [(sxv * syy - syv * sxy) / det, (syv * sxx - sxv * sxy) / det];
        }
    }
    grads
}
