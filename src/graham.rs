//! Sequential convex hull builder (Graham scan).
//!
//! The pivot is the bottom-right-most point (minimum `y`, then maximum `x`),
//! so every other point sits at a polar angle in `[0, π]` around it and the
//! angular sort never wraps. The turn test compares the cross product against
//! `epsilon` scaled by both edge lengths, i.e. `epsilon` bounds the sine of the
//! turn angle, so the result does not depend on the scale of the input.

use glam::DVec2;

use crate::{Hull, Point};

/// Default tolerance on the sine of a turn.
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Cross product of `(a - o)` and `(b - o)`.
///
/// Positive when `o -> a -> b` turns counter-clockwise.
#[inline]
pub fn orient2d(o: Point, a: Point, b: Point) -> f64 {
    let o = o.to_glam();
    (a.to_glam() - o).perp_dot(b.to_glam() - o)
}

/// True if `a -> b -> c` turns counter-clockwise by more than `asin(epsilon)`.
///
/// Turns sharper than a right angle always count, so a vertex at the tip of
/// a thin spike is kept.
#[inline]
pub fn is_left_turn(a: Point, b: Point, c: Point, epsilon: f64) -> bool {
    let ab = b.to_glam() - a.to_glam();
    let bc = c.to_glam() - b.to_glam();
    let cross = ab.perp_dot(bc);
    cross > 0.0 && (ab.dot(bc) < 0.0 || cross > epsilon * ab.length() * bc.length())
}

/// Index of the pivot: minimum `y`, ties broken by maximum `x`.
///
/// Returns `None` for an empty slice.
pub fn pivot_index(points: &[Point]) -> Option<usize> {
    let mut iter = points.iter().enumerate();
    let (mut best, first) = iter.next()?;
    let mut best_p = *first;
    for (i, &p) in iter {
        if p.y < best_p.y || (p.y == best_p.y && p.x > best_p.x) {
            best = i;
            best_p = p;
        }
    }
    Some(best)
}

#[derive(Clone, Copy)]
struct Candidate {
    point: Point,
    offset: DVec2,
    angle: f64,
    dist_sq: f64,
}

impl Candidate {
    #[inline]
    fn new(point: Point, pivot: DVec2) -> Self {
        let offset = point.to_glam() - pivot;
        // offset.y >= 0 for every point; abs() folds a -0.0 that would flip atan2 to -π.
        let angle = offset.y.abs().atan2(offset.x);
        Self {
            point,
            offset,
            angle,
            dist_sq: offset.length_squared(),
        }
    }

    /// Exactly on the same ray from the pivot.
    ///
    /// Near-collinear points are left to the turn test: far from the pivot a
    /// tiny angle still separates distinct vertices.
    #[inline]
    fn same_ray(&self, other: &Candidate) -> bool {
        self.offset.perp_dot(other.offset) == 0.0 && self.offset.dot(other.offset) > 0.0
    }
}

/// Sort by polar angle around the pivot and keep only the farthest point of
/// every run collinear with the pivot.
fn angular_order(points: &[Point], pivot: Point) -> Vec<Point> {
    let pivot_v = pivot.to_glam();
    let mut candidates: Vec<Candidate> = points
        .iter()
        .filter(|&&p| p != pivot)
        .map(|&p| Candidate::new(p, pivot_v))
        .collect();

    candidates.sort_by(|a, b| {
        a.angle
            .total_cmp(&b.angle)
            .then(a.dist_sq.total_cmp(&b.dist_sq))
    });

    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for c in candidates {
        match kept.last_mut() {
            Some(last) if last.same_ray(&c) => {
                if c.dist_sq > last.dist_sq {
                    *last = c;
                }
            }
            _ => kept.push(c),
        }
    }

    kept.into_iter().map(|c| c.point).collect()
}

/// Compute the convex hull of `points`.
///
/// Fewer than 3 points are returned unchanged. Points equal to the pivot are
/// dropped, so a set of identical points yields a single-vertex hull.
pub fn graham_scan(points: &[Point], epsilon: f64) -> Hull {
    if points.len() < 3 {
        return Hull::from_vec(points.to_vec());
    }
    merge_scan(points, epsilon)
}

/// Graham scan without the small-input passthrough.
///
/// Used on the union of partial hulls: a degenerate union of one or two
/// points must still be ordered from the pivot and deduplicated to match a
/// scan over the whole input.
pub fn merge_scan(points: &[Point], epsilon: f64) -> Hull {
    let pivot = match pivot_index(points) {
        Some(i) => points[i],
        None => return Hull::default(),
    };
    let ordered = angular_order(points, pivot);

    let mut stack: Vec<Point> = Vec::with_capacity(ordered.len() + 1);
    stack.push(pivot);
    for p in ordered {
        while stack.len() >= 2 {
            let top = stack[stack.len() - 1];
            let second = stack[stack.len() - 2];
            if is_left_turn(second, top, p, epsilon) {
                break;
            }
            stack.pop();
        }
        stack.push(p);
    }
    // Closing edge back to the pivot.
    while stack.len() >= 3 {
        let top = stack[stack.len() - 1];
        let second = stack[stack.len() - 2];
        if is_left_turn(second, top, pivot, epsilon) {
            break;
        }
        stack.pop();
    }

    Hull::from_vec(stack)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&c| c.into()).collect()
    }

    #[test]
    fn test_rhomb() {
        let input = pts(&[(2.0, 0.0), (0.0, 2.0), (-2.0, 0.0), (0.0, -2.0)]);
        let hull = graham_scan(&input, DEFAULT_EPSILON);
        assert_eq!(
            hull.points(),
            pts(&[(0.0, -2.0), (2.0, 0.0), (0.0, 2.0), (-2.0, 0.0)]).as_slice()
        );
    }

    #[test]
    fn test_pivot_prefers_max_x_on_tie() {
        let input = pts(&[(2.0, 0.0), (0.0, 2.0), (-2.0, 0.0)]);
        assert_eq!(pivot_index(&input), Some(0));
        let hull = graham_scan(&input, DEFAULT_EPSILON);
        assert_eq!(hull.points(), input.as_slice());
    }

    #[test]
    fn test_five_extreme_points() {
        let input = pts(&[(2.0, 0.0), (1.0, -1.0), (-1.0, -1.0), (0.0, 2.0), (-2.0, 0.0)]);
        let hull = graham_scan(&input, DEFAULT_EPSILON);
        assert_eq!(
            hull.points(),
            pts(&[(1.0, -1.0), (2.0, 0.0), (0.0, 2.0), (-2.0, 0.0), (-1.0, -1.0)]).as_slice()
        );
    }

    #[test]
    fn test_degenerate_passthrough() {
        let two = pts(&[(3.0, 1.0), (-1.0, 5.0)]);
        assert_eq!(graham_scan(&two, DEFAULT_EPSILON).points(), two.as_slice());
        assert!(graham_scan(&[], DEFAULT_EPSILON).is_empty());
        let one = pts(&[(7.0, 7.0)]);
        assert_eq!(graham_scan(&one, DEFAULT_EPSILON).len(), 1);
    }

    #[test]
    fn test_collinear_keeps_endpoints() {
        let input = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let hull = graham_scan(&input, DEFAULT_EPSILON);
        assert_eq!(hull.points(), pts(&[(3.0, 0.0), (0.0, 0.0)]).as_slice());
    }

    #[test]
    fn test_points_on_edges_are_dropped() {
        let input = pts(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (1.0, 0.0),
            (2.0, 1.0),
            (2.0, 2.0),
            (1.0, 1.0),
            (0.0, 2.0),
            (0.0, 1.0),
        ]);
        let hull = graham_scan(&input, DEFAULT_EPSILON);
        assert_eq!(
            hull.points(),
            pts(&[(2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]).as_slice()
        );
    }

    #[test]
    fn test_duplicates_tolerated() {
        let input = pts(&[
            (0.0, -2.0),
            (2.0, 0.0),
            (0.0, -2.0),
            (0.0, 2.0),
            (2.0, 0.0),
            (-2.0, 0.0),
            (0.0, 2.0),
        ]);
        let hull = graham_scan(&input, DEFAULT_EPSILON);
        assert_eq!(
            hull.points(),
            pts(&[(0.0, -2.0), (2.0, 0.0), (0.0, 2.0), (-2.0, 0.0)]).as_slice()
        );
    }

    #[test]
    fn test_all_identical() {
        let input = pts(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]);
        let hull = graham_scan(&input, DEFAULT_EPSILON);
        assert_eq!(hull.points(), pts(&[(1.0, 1.0)]).as_slice());
    }

    #[test]
    fn test_orientation_helpers() {
        let o = Point::new(0.0, 0.0);
        let a = Point::new(1.0, 0.0);
        let b = Point::new(0.0, 1.0);
        assert_eq!(orient2d(o, a, b), 1.0);
        assert!(is_left_turn(o, a, b, DEFAULT_EPSILON));
        assert!(!is_left_turn(o, b, a, DEFAULT_EPSILON));
        assert!(!is_left_turn(o, a, Point::new(2.0, 0.0), DEFAULT_EPSILON));
    }

    #[test]
    fn test_merge_scan_orders_small_unions() {
        let union = pts(&[(0.0, 1.0), (0.0, 0.0)]);
        assert_eq!(graham_scan(&union, DEFAULT_EPSILON).points(), union.as_slice());
        assert_eq!(
            merge_scan(&union, DEFAULT_EPSILON).points(),
            pts(&[(0.0, 0.0), (0.0, 1.0)]).as_slice()
        );

        let same = pts(&[(3.0, 3.0), (3.0, 3.0)]);
        assert_eq!(merge_scan(&same, DEFAULT_EPSILON).len(), 1);
        assert!(merge_scan(&[], DEFAULT_EPSILON).is_empty());
    }

    #[test]
    fn test_turn_test_ignores_scale() {
        let shape = [(1.0, -1.0), (2.0, 0.0), (1.5, 1.5), (0.0, 2.0), (-1.0, -1.0)];
        let expected = graham_scan(&pts(&shape), DEFAULT_EPSILON);
        for scale in [1e-4, 1e-2, 1e3] {
            let scaled: Vec<Point> = shape
                .iter()
                .map(|&(x, y)| Point::new(x * scale, y * scale))
                .collect();
            let hull = graham_scan(&scaled, DEFAULT_EPSILON);
            assert_eq!(hull.len(), expected.len(), "scale {}", scale);
        }
    }

    #[test]
    fn test_small_cluster_far_from_pivot() {
        // The cluster's top edge turns by only 2e-5 in raw cross product.
        let input = pts(&[
            (100.0, 0.0),
            (-100.0, 0.0),
            (0.01, 50.01),
            (0.005, 50.012),
            (0.0, 50.01),
            (0.002, 50.005),
            (0.005, 50.0),
        ]);
        let hull = graham_scan(&input, DEFAULT_EPSILON);
        assert_eq!(
            hull.points(),
            pts(&[
                (100.0, 0.0),
                (0.01, 50.01),
                (0.005, 50.012),
                (0.0, 50.01),
                (-100.0, 0.0)
            ])
            .as_slice()
        );
    }

    #[test]
    fn test_sharp_spike_kept() {
        // The turn at the tip has a sine far below epsilon.
        let input = pts(&[(0.0, 0.0), (1.0, 0.0), (0.5, 1e5), (0.5, 0.5)]);
        let hull = graham_scan(&input, DEFAULT_EPSILON);
        assert_eq!(
            hull.points(),
            pts(&[(1.0, 0.0), (0.5, 1e5), (0.0, 0.0)]).as_slice()
        );
    }
}
