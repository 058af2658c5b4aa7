//! Contiguous, order-preserving split of a point set across workers.
//!
//! With `base = n / workers` and `remainder = n % workers`, the first
//! `remainder` ranks get `base + 1` points and the rest get `base`. Every rank
//! can derive its own bounds from `n` alone.

use std::ops::Range;

use crate::Point;

/// Number of points assigned to `rank`.
#[inline]
pub fn chunk_len(n: usize, workers: usize, rank: usize) -> usize {
    debug_assert!(workers > 0 && rank < workers);
    let base = n / workers;
    let remainder = n % workers;
    base + usize::from(rank < remainder)
}

/// Index range of the chunk assigned to `rank`.
#[inline]
pub fn chunk_range(n: usize, workers: usize, rank: usize) -> Range<usize> {
    debug_assert!(workers > 0 && rank < workers);
    let base = n / workers;
    let remainder = n % workers;
    let start = rank * base + rank.min(remainder);
    start..start + chunk_len(n, workers, rank)
}

/// Split `points` into `workers` contiguous chunks, in rank order.
pub fn partition(points: &[Point], workers: usize) -> Vec<&[Point]> {
    (0..workers)
        .map(|rank| &points[chunk_range(points.len(), workers, rank)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn test_uneven_split() {
        let lens: Vec<usize> = (0..4).map(|r| chunk_len(10, 4, r)).collect();
        assert_eq!(lens, vec![3, 3, 2, 2]);
        assert_eq!(chunk_range(10, 4, 0), 0..3);
        assert_eq!(chunk_range(10, 4, 1), 3..6);
        assert_eq!(chunk_range(10, 4, 2), 6..8);
        assert_eq!(chunk_range(10, 4, 3), 8..10);
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        for n in [0, 1, 3, 7, 16, 17] {
            for workers in 1..=6 {
                let points = line(n);
                let chunks = partition(&points, workers);
                assert_eq!(chunks.len(), workers);
                let joined: Vec<Point> = chunks.concat();
                assert_eq!(joined, points, "n={} workers={}", n, workers);
            }
        }
    }

    #[test]
    fn test_more_workers_than_points() {
        let points = line(3);
        let chunks = partition(&points, 5);
        let lens: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(lens, vec![1, 1, 1, 0, 0]);
        assert_eq!(chunk_range(3, 5, 4), 3..3);
    }
}
