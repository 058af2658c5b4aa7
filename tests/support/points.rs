#![allow(dead_code)]

use planar_hull::Point;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

/// Build points from `(x, y)` pairs.
pub fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&c| c.into()).collect()
}

/// Random points uniformly distributed in the square `[-1000, 1000]^2`.
pub fn random_square_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_square_points_with_rng(n, &mut rng)
}

pub fn random_square_points_with_rng<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Point> {
    (0..n)
        .map(|_| Point::new(rng.gen_range(-1000.0..1000.0), rng.gen_range(-1000.0..1000.0)))
        .collect()
}

/// Random points uniformly distributed in a disk of the given radius.
pub fn random_disk_points(n: usize, radius: f64, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let r = radius * rng.gen_range(0.0f64..1.0).sqrt();
            let theta = rng.gen_range(0.0..TAU);
            Point::new(r * theta.cos(), r * theta.sin())
        })
        .collect()
}

/// Points evenly spaced on a circle, optionally jittered radially, in shuffled order.
///
/// Every point is a hull vertex when `jitter` is zero and `n` is small
/// enough that neighbors are not collinear within tolerance.
pub fn circle_points(n: usize, radius: f64, jitter: f64, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut points: Vec<Point> = (0..n)
        .map(|i| {
            let theta = TAU * i as f64 / n as f64;
            let r = if jitter > 0.0 {
                radius + rng.gen_range(-jitter..jitter)
            } else {
                radius
            };
            Point::new(r * theta.cos(), r * theta.sin())
        })
        .collect();
    points.shuffle(&mut rng);
    points
}

/// Base corners `(±100, 0)` plus `n` points within `±spread` of `(0, 50)`.
///
/// The cluster is tiny next to the base, so its hull edges are short while
/// the two long edges reach it at nearly the same angle.
pub fn cluster_with_extremes(n: usize, spread: f64, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut points = vec![Point::new(100.0, 0.0), Point::new(-100.0, 0.0)];
    points.extend((0..n).map(|_| {
        Point::new(
            rng.gen_range(-spread..spread),
            50.0 + rng.gen_range(-spread..spread),
        )
    }));
    points.shuffle(&mut rng);
    points
}

/// A `k x k` integer grid, row-major. Heavily collinear.
pub fn grid_points(k: usize) -> Vec<Point> {
    (0..k)
        .flat_map(|j| (0..k).map(move |i| Point::new(i as f64, j as f64)))
        .collect()
}

/// Rhomb with corners at distance 2 on the axes, plus 13 interior points.
pub fn rhomb_with_interior() -> Vec<Point> {
    pts(&[
        (0.3, -0.25),
        (1.0, 0.0),
        (2.0, 0.0),
        (0.3, 0.25),
        (0.0, -2.0),
        (0.0, -1.0),
        (0.25, -0.3),
        (-0.25, -0.3),
        (0.0, 1.0),
        (0.0, 2.0),
        (-0.25, 0.3),
        (0.25, 0.3),
        (-0.3, 0.25),
        (-1.0, 0.0),
        (-2.0, 0.0),
        (-0.3, -0.25),
        (0.1, 0.1),
    ])
}

/// Axis-aligned square with corners at `(±2, ±2)`, plus 13 interior points.
pub fn square_with_interior() -> Vec<Point> {
    pts(&[
        (-2.0, -2.0),
        (-1.0, -1.0),
        (-0.5, -1.0),
        (-1.0, -0.5),
        (2.0, -2.0),
        (0.5, -1.0),
        (1.0, -1.0),
        (1.0, -0.5),
        (2.0, 2.0),
        (1.0, 1.0),
        (0.5, 1.0),
        (1.0, 0.5),
        (-2.0, 2.0),
        (-0.5, 1.0),
        (-1.0, 1.0),
        (-1.0, 0.5),
        (0.1, 0.1),
    ])
}
