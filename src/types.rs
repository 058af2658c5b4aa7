//! Core types for planar hull computation.

use bytemuck::{Pod, Zeroable};
use glam::DVec2;

/// A point in the plane.
///
/// `#[repr(C)]` with two `f64` fields, so a flat `[x0, y0, x1, y1, ...]`
/// buffer can be viewed as `[Point]` without copying (see [`crate::codec`]).
/// Coordinates are expected to be finite.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create from any type implementing `PointLike`.
    #[inline]
    pub fn from_like<P: PointLike>(p: &P) -> Self {
        Self::new(p.x(), p.y())
    }

    #[inline]
    pub fn to_glam(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn from_glam(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }

    /// True if both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<DVec2> for Point {
    #[inline]
    fn from(v: DVec2) -> Self {
        Self::from_glam(v)
    }
}

impl From<Point> for DVec2 {
    #[inline]
    fn from(p: Point) -> DVec2 {
        p.to_glam()
    }
}

/// Trait for types that can be used as input points.
pub trait PointLike {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl PointLike for Point {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }
    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
}

impl PointLike for [f64; 2] {
    #[inline]
    fn x(&self) -> f64 {
        self[0]
    }
    #[inline]
    fn y(&self) -> f64 {
        self[1]
    }
}

impl PointLike for (f64, f64) {
    #[inline]
    fn x(&self) -> f64 {
        self.0
    }
    #[inline]
    fn y(&self) -> f64 {
        self.1
    }
}

impl PointLike for DVec2 {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }
    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
}

/// A convex hull: vertices in counter-clockwise order, starting at the pivot.
///
/// Inputs with fewer than 3 points produce a degenerate hull holding those
/// points unchanged (a point or a segment rather than a polygon).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hull {
    points: Vec<Point>,
}

impl Hull {
    #[inline]
    pub(crate) fn from_vec(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of hull vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if the hull has at least 3 vertices.
    #[inline]
    pub fn is_polygon(&self) -> bool {
        self.points.len() >= 3
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Twice the signed area (shoelace). Positive for counter-clockwise polygons.
    pub fn doubled_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        (0..n)
            .map(|i| {
                let a = self.points[i].to_glam();
                let b = self.points[(i + 1) % n].to_glam();
                a.perp_dot(b)
            })
            .sum()
    }
}

impl<'a> IntoIterator for &'a Hull {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
