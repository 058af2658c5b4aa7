//! Geometric validation for computed hulls.
//!
//! Provides functions to verify that a hull is convex, encloses its input,
//! and has no removable vertices. Useful for debugging, testing, and catching
//! numerical issues.

use crate::graham::{is_left_turn, orient2d};
use crate::{Hull, Point};

/// Detailed validation report for a hull against the points it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct HullReport {
    /// Number of input points checked.
    pub num_points: usize,
    /// Number of hull vertices.
    pub num_vertices: usize,

    /// Consecutive vertex triples that are not a strict left turn.
    pub non_convex_turns: usize,
    /// Input points strictly outside the hull (beyond tolerance).
    pub outside_points: usize,
    /// Vertices that could be dropped without losing any point.
    pub redundant_vertices: usize,
    /// Vertices that repeat an earlier vertex exactly.
    pub duplicate_vertices: usize,

    /// Twice the signed area of the hull polygon.
    pub doubled_area: f64,
}

impl HullReport {
    /// Convex, counter-clockwise, enclosing, and minimal.
    pub fn is_valid(&self) -> bool {
        self.non_convex_turns == 0
            && self.outside_points == 0
            && self.redundant_vertices == 0
            && self.duplicate_vertices == 0
            && (self.num_vertices < 3 || self.doubled_area > 0.0)
    }

    /// Format a summary of any issues found.
    pub fn summary(&self) -> String {
        let mut issues = Vec::new();

        if self.non_convex_turns > 0 {
            issues.push(format!("{} non-convex turns", self.non_convex_turns));
        }
        if self.outside_points > 0 {
            issues.push(format!("{} points outside", self.outside_points));
        }
        if self.redundant_vertices > 0 {
            issues.push(format!("{} redundant vertices", self.redundant_vertices));
        }
        if self.duplicate_vertices > 0 {
            issues.push(format!("{} duplicate vertices", self.duplicate_vertices));
        }
        if self.num_vertices >= 3 && self.doubled_area <= 0.0 {
            issues.push("clockwise or zero-area polygon".to_string());
        }

        if issues.is_empty() {
            "Valid".to_string()
        } else {
            issues.join(", ")
        }
    }
}

impl std::fmt::Display for HullReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HullReport {{ n={}, h={}, area2={:.4}, {} }}",
            self.num_points,
            self.num_vertices,
            self.doubled_area,
            self.summary()
        )
    }
}

/// True if `p` lies on or inside the convex polygon `poly` (CCW), within `epsilon`.
///
/// The tolerance is relative: `p` may sit outside an edge by at most
/// `epsilon` times its distance to the nearer endpoint. Polygons with fewer
/// than 3 vertices are treated as a point or a segment.
pub fn contains(poly: &[Point], p: Point, epsilon: f64) -> bool {
    match poly.len() {
        0 => false,
        1 => poly[0] == p,
        2 => on_segment(poly[0], poly[1], p, epsilon),
        n => (0..n).all(|i| !outside_edge(poly[i], poly[(i + 1) % n], p, epsilon)),
    }
}

fn edge_slack(a: Point, b: Point, p: Point, epsilon: f64) -> f64 {
    let (a, b, p) = (a.to_glam(), b.to_glam(), p.to_glam());
    epsilon * (b - a).length() * (p - a).length().min((p - b).length())
}

fn outside_edge(a: Point, b: Point, p: Point, epsilon: f64) -> bool {
    orient2d(a, b, p) < -edge_slack(a, b, p, epsilon)
}

fn on_segment(a: Point, b: Point, p: Point, epsilon: f64) -> bool {
    if orient2d(a, b, p).abs() > edge_slack(a, b, p, epsilon) {
        return false;
    }
    let (a, b, p) = (a.to_glam(), b.to_glam(), p.to_glam());
    let ab = b - a;
    let t = (p - a).dot(ab);
    t >= 0.0 && t <= ab.length_squared()
}

/// Validate `hull` against the `points` it was computed from.
///
/// Checks:
/// - Convexity (every consecutive triple turns left, see [`is_left_turn`])
/// - Containment (no input point outside any hull edge, see [`contains`])
/// - Minimality (no vertex lies inside the polygon of the others)
/// - No repeated vertices
pub fn validate(points: &[Point], hull: &Hull, epsilon: f64) -> HullReport {
    let verts = hull.points();
    let h = verts.len();

    let non_convex_turns = if h >= 3 {
        (0..h)
            .filter(|&i| !is_left_turn(verts[i], verts[(i + 1) % h], verts[(i + 2) % h], epsilon))
            .count()
    } else {
        0
    };

    let outside_points = points
        .iter()
        .filter(|&&p| !contains(verts, p, epsilon))
        .count();

    let redundant_vertices = if h >= 2 {
        let mut rest: Vec<Point> = Vec::with_capacity(h - 1);
        (0..h)
            .filter(|&i| {
                rest.clear();
                rest.extend(verts[..i].iter().chain(&verts[i + 1..]).copied());
                contains(&rest, verts[i], epsilon)
            })
            .count()
    } else {
        0
    };

    let mut sorted = verts.to_vec();
    sorted.sort_unstable_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    let duplicate_vertices = sorted.windows(2).filter(|w| w[0] == w[1]).count();

    HullReport {
        num_points: points.len(),
        num_vertices: h,
        non_convex_turns,
        outside_points,
        redundant_vertices,
        duplicate_vertices,
        doubled_area: hull.doubled_area(),
    }
}
