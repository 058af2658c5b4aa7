//! Flat coordinate buffers <-> point slices.
//!
//! Input buffers are interleaved `[x0, y0, x1, y1, ...]`. Decoding borrows the
//! buffer as `&[Point]` (no copy); encoding writes a prefix of the output and
//! leaves the rest of it as the caller left it.

use crate::{HullError, Point};

/// Minimum number of points accepted by validation.
pub const MIN_POINTS: usize = 3;

/// Check the shape of a flat coordinate buffer of length `len`.
#[inline]
pub fn check_coord_len(len: usize) -> Result<(), HullError> {
    if len % 2 != 0 || len < 2 * MIN_POINTS {
        return Err(HullError::MalformedInput { len });
    }
    Ok(())
}

/// View a flat coordinate buffer as a point slice.
pub fn decode_points(buf: &[f64]) -> Result<&[Point], HullError> {
    check_coord_len(buf.len())?;
    bytemuck::try_cast_slice(buf).map_err(|_| HullError::MalformedInput { len: buf.len() })
}

/// Write `points` as interleaved coordinates at the start of `out`.
///
/// Returns the number of values written (`2 * points.len()`).
pub fn encode_points(points: &[Point], out: &mut [f64]) -> Result<usize, HullError> {
    let coords: &[f64] = bytemuck::cast_slice(points);
    if coords.len() > out.len() {
        return Err(HullError::CapacityMismatch {
            expected: coords.len(),
            actual: out.len(),
        });
    }
    out[..coords.len()].copy_from_slice(coords);
    Ok(coords.len())
}

/// Flatten points into a freshly allocated coordinate buffer.
pub fn flatten(points: &[Point]) -> Vec<f64> {
    bytemuck::cast_slice(points).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_interleaved() {
        let buf = [2.0, 0.0, 0.0, 2.0, -2.0, 0.0];
        let points = decode_points(&buf).unwrap();
        assert_eq!(
            points,
            &[
                Point::new(2.0, 0.0),
                Point::new(0.0, 2.0),
                Point::new(-2.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_decode_rejects_short_and_odd() {
        assert_eq!(
            decode_points(&[2.0, 2.0, 1.0, 1.0]),
            Err(HullError::MalformedInput { len: 4 })
        );
        assert_eq!(
            decode_points(&[2.0, 2.0, 1.0, 1.0, -2.0, 2.0, 1.0]),
            Err(HullError::MalformedInput { len: 7 })
        );
        assert!(decode_points(&[]).is_err());
    }

    #[test]
    fn test_encode_leaves_tail_untouched() {
        let hull = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        let mut out = [9.0; 6];
        let written = encode_points(&hull, &mut out).unwrap();
        assert_eq!(written, 4);
        assert_eq!(out, [1.0, 2.0, 3.0, 4.0, 9.0, 9.0]);
    }

    #[test]
    fn test_encode_too_small() {
        let hull = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        let mut out = [0.0; 3];
        assert_eq!(
            encode_points(&hull, &mut out),
            Err(HullError::CapacityMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(out, [0.0; 3]);
    }

    #[test]
    fn test_flatten() {
        let pts = [Point::new(1.0, 2.0), Point::new(3.0, 4.0)];
        assert_eq!(flatten(&pts), vec![1.0, 2.0, 3.0, 4.0]);
    }
}
