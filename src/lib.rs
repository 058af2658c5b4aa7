//! Planar convex hulls (Graham scan) with a distributed pipeline.
//!
//! The input is split into contiguous chunks, one per worker; every worker
//! computes the hull of its chunk, and the root merges the partial hulls with
//! one more Graham scan. The result is identical to a single sequential scan.
//!
//! # Example
//!
//! ```
//! use planar_hull::{compute_with, HullConfig, Point};
//!
//! let points = vec![
//!     Point::new(2.0, 0.0),
//!     Point::new(0.0, 2.0),
//!     Point::new(-2.0, 0.0),
//!     Point::new(0.0, -2.0),
//!     Point::new(0.1, 0.1),
//! ];
//!
//! let output = compute_with(&points, HullConfig::default().with_workers(3))
//!     .expect("computation should succeed");
//! assert_eq!(output.hull.len(), 4);
//! assert_eq!(output.hull.points()[0], Point::new(0.0, -2.0));
//! ```

mod error;
mod types;

pub mod cluster;
pub mod codec;
pub mod coordinator;
pub mod graham;
pub mod partition;
pub mod task;
pub mod validation;
pub mod writer;

pub(crate) mod timing;

pub use error::{BufferKind, HullError};
pub use graham::DEFAULT_EPSILON;
pub use task::{HullRequest, HullTask, Mode};
pub use types::{Hull, Point, PointLike};
pub use writer::HullSink;

/// Output from hull computation, including the hull and diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct HullOutput {
    /// The computed hull.
    pub hull: Hull,
    /// Diagnostic information about the computation.
    pub diagnostics: HullDiagnostics,
}

/// Diagnostic information from hull computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HullDiagnostics {
    /// Number of ranks that took part (1 for a sequential run).
    pub workers: usize,
    /// Partial hull size per rank, in rank order. Empty for a sequential run.
    pub partial_sizes: Vec<usize>,
    /// Number of points fed to the merge pass (0 for a sequential run).
    pub merge_candidates: usize,
}

impl HullDiagnostics {
    /// Returns true if the hull came from the partition/merge pipeline.
    pub fn is_distributed(&self) -> bool {
        !self.partial_sizes.is_empty()
    }
}

/// Configuration for hull computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullConfig {
    /// Tolerance on the sine of a turn between two hull edges.
    ///
    /// Scale-free: a vertex survives if its edges turn by more than about
    /// `epsilon` radians. Larger values drop more nearly-collinear boundary
    /// points; smaller values keep them as vertices.
    pub epsilon: f64,
    /// Number of workers. With 1, [`compute_with`] runs a single sequential scan.
    pub workers: usize,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            workers: 1,
        }
    }
}

impl HullConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Reject configurations no run can use.
    pub fn check(&self) -> Result<(), HullError> {
        if self.workers == 0 {
            return Err(HullError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(HullError::InvalidConfig(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// Compute a convex hull sequentially with the given tolerance.
///
/// Accepts any number of points; fewer than 3 come back unchanged.
pub fn compute_sequential(points: &[Point], epsilon: f64) -> Hull {
    graham::graham_scan(points, epsilon)
}

/// Compute a convex hull with default settings.
///
/// Errors are reserved for invalid inputs (fewer than 3 points).
pub fn compute<P: PointLike>(points: &[P]) -> Result<HullOutput, HullError> {
    compute_with(points, HullConfig::default())
}

/// Compute a convex hull with explicit configuration.
pub fn compute_with<P: PointLike>(
    points: &[P],
    config: HullConfig,
) -> Result<HullOutput, HullError> {
    config.check()?;
    if points.len() < codec::MIN_POINTS {
        return Err(HullError::MalformedInput {
            len: 2 * points.len(),
        });
    }

    let points: Vec<Point> = points.iter().map(Point::from_like).collect();

    if config.workers == 1 {
        let hull = compute_sequential(&points, config.epsilon);
        return Ok(HullOutput {
            hull,
            diagnostics: HullDiagnostics {
                workers: 1,
                ..Default::default()
            },
        });
    }

    coordinator::compute_distributed(&points, &config)
}
