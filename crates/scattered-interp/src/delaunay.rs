//! Incremental Delaunay triangulation (Bowyer-Watson) with point location.
//!
//! The point counts involved are tiny (dozens of stations plus four corner
//! anchors), so the classic O(n^2) insertion scheme with a linear-scan
//! locate is more than fast enough and keeps the geometry auditable.

/// Barycentric tolerance for point-in-triangle acceptance.
const LOCATE_EPS: f64 = 1e-9;

/// Cross product of (b - a) and (c - a).
#[inline]
fn cross(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// True when `d` lies strictly inside the circumcircle of triangle `abc`.
///
/// Works for either winding; degenerate (collinear) triangles have no
/// circumcircle and never report containment.
fn in_circumcircle(a: [f64; 2], b: [f64; 2], c: [f64; 2], d: [f64; 2]) -> bool {
    let orient = cross(a, b, c);
    if orient.abs() < f64::EPSILON {
        return false;
    }

    let ax = a[0] - d[0];
    let ay = a[1] - d[1];
    let bx = b[0] - d[0];
    let by = b[1] - d[1];
    let cx = c[0] - d[0];
    let cy = c[1] - d[1];

    let det = (ax * ax + ay * ay) * (bx * cy - cx * by)
        - (bx * bx + by * by) * (ax * cy - cx * ay)
        + (cx * cx + cy * cy) * (ax * by - bx * ay);

    if orient > 0.0 {
        det > 0.0
    } else {
        det < 0.0
    }
}

/// A Delaunay triangulation over a fixed point set.
#[derive(Debug, Clone)]
pub struct Triangulation {
    points: Vec<[f64; 2]>,
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    /// Triangulate a point set.
    ///
    /// Fewer than three points, or a fully collinear set, yields a
    /// triangulation with no triangles; `locate` then fails everywhere and
    /// the caller surfaces an all-no-data field rather than an error.
    pub fn build(points: &[[f64; 2]]) -> Self {
        let n = points.len();
        if n < 3 {
            return Self {
                points: points.to_vec(),
                triangles: Vec::new(),
            };
        }

        let mut pts = points.to_vec();

        // Super-triangle comfortably enclosing every input point.
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p[0]);
            min_y = min_y.min(p[1]);
            max_x = max_x.max(p[0]);
            max_y = max_y.max(p[1]);
        }
        let span = (max_x - min_x).max(max_y - min_y).max(1.0);
        let mid_x = (min_x + max_x) / 2.0;
        let mid_y = (min_y + max_y) / 2.0;
        pts.push([mid_x - 20.0 * span, mid_y - span]);
        pts.push([mid_x + 20.0 * span, mid_y - span]);
        pts.push([mid_x, mid_y + 20.0 * span]);

        let mut triangles: Vec<[usize; 3]> = vec![[n, n + 1, n + 2]];

        for i in 0..n {
            let p = pts[i];

            // Triangles whose circumcircle contains the new point.
            let mut bad: Vec<usize> = Vec::new();
            for (t, tri) in triangles.iter().enumerate() {
                if in_circumcircle(pts[tri[0]], pts[tri[1]], pts[tri[2]], p) {
                    bad.push(t);
                }
            }

            // Boundary of the cavity: edges belonging to exactly one bad triangle.
            let mut boundary: Vec<(usize, usize)> = Vec::new();
            for &t in &bad {
                let tri = triangles[t];
                for e in 0..3 {
                    let edge = (tri[e], tri[(e + 1) % 3]);
                    let shared = bad.iter().any(|&other| {
                        other != t && {
                            let o = triangles[other];
                            o.contains(&edge.0) && o.contains(&edge.1)
                        }
                    });
                    if !shared {
                        boundary.push(edge);
                    }
                }
            }

            for &t in bad.iter().rev() {
                triangles.swap_remove(t);
            }
            for (a, b) in boundary {
                triangles.push([a, b, i]);
            }
        }

        // Drop everything attached to the super-triangle, and any sliver
        // left behind by collinear input.
        triangles.retain(|tri| {
            tri.iter().all(|&v| v < n)
                && cross(pts[tri[0]], pts[tri[1]], pts[tri[2]]).abs() > f64::EPSILON
        });

        pts.truncate(n);
        Self {
            points: pts,
            triangles,
        }
    }

    /// The triangulated point set.
    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    /// Triangle vertex indices.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// True when the input was too degenerate to triangulate.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Barycentric coordinates of `p` with respect to triangle `tri`.
    ///
    /// Returns `None` for a degenerate triangle.
    pub fn barycentric(&self, tri: [usize; 3], p: [f64; 2]) -> Option<[f64; 3]> {
        let a = self.points[tri[0]];
        let b = self.points[tri[1]];
        let c = self.points[tri[2]];
        let denom = cross(a, b, c);
        if denom.abs() < f64::EPSILON {
            return None;
        }
        let la = cross(p, b, c) / denom;
        let lb = cross(p, c, a) / denom;
        let lc = cross(p, a, b) / denom;
        Some([la, lb, lc])
    }

    /// Find the triangle containing `p`, returning its index and the
    /// barycentric coordinates of `p` within it.
    ///
    /// `hint` (a previously returned triangle index) is tried first; grid
    /// cells are visited in scan order, so the hit rate is high.
    pub fn locate(&self, p: [f64; 2], hint: Option<usize>) -> Option<(usize, [f64; 3])> {
        if let Some(h) = hint {
            if h < self.triangles.len() {
                if let Some(l) = self.contains(h, p) {
                    return Some((h, l));
                }
            }
        }
        for t in 0..self.triangles.len() {
            if let Some(l) = self.contains(t, p) {
                return Some((t, l));
            }
        }
        None
    }

    fn contains(&self, t: usize, p: [f64; 2]) -> Option<[f64; 3]> {
        let l = self.barycentric(self.triangles[t], p)?;
        if l.iter().all(|&v| v >= -LOCATE_EPS) {
            Some(l)
        } else {
            None
        }
    }

    /// Adjacency lists: for each point, the indices of points sharing a
    /// triangle edge with it.
    pub fn neighbors(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.points.len()];
        for tri in &self.triangles {
            for e in 0..3 {
                let a = tri[e];
                let b = tri[(e + 1) % 3];
                if !adj[a].contains(&b) {
                    adj[a].push(b);
                }
                if !adj[b].contains(&a) {
                    adj[b].push(a);
                }
            }
        }
        adj
    }
}
