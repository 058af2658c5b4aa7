//! Serialize a finished hull into caller-provided output buffers.

use crate::codec::encode_points;
use crate::{Hull, HullError};

/// Output buffers for one run: the vertex count slot and the coordinate buffer.
///
/// Only the first `2 * hull.len()` values of `points` are written; whatever
/// the caller left after them stays as it was.
#[derive(Debug)]
pub struct HullSink<'a> {
    pub size: &'a mut usize,
    pub points: &'a mut [f64],
}

impl<'a> HullSink<'a> {
    pub fn new(size: &'a mut usize, points: &'a mut [f64]) -> Self {
        Self { size, points }
    }

    /// Capacity of the coordinate buffer, in values.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.points.len()
    }
}

/// Write `hull` into `sink`. Nothing is written if the hull does not fit.
pub fn write_result(hull: &Hull, sink: &mut HullSink<'_>) -> Result<(), HullError> {
    let needed = 2 * hull.len();
    if needed > sink.points.len() {
        return Err(HullError::CapacityMismatch {
            expected: needed,
            actual: sink.points.len(),
        });
    }
    encode_points(hull.points(), sink.points)?;
    *sink.size = hull.len();
    Ok(())
}
