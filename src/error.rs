//! Error types for hull computation.

use std::fmt;

use thiserror::Error;

use crate::task::TaskStage;

/// Which caller-provided buffer is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// The flat coordinate input buffer.
    Input,
    /// The hull size slot and hull coordinate buffer.
    Output,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::Input => f.write_str("input"),
            BufferKind::Output => f.write_str("output"),
        }
    }
}

/// Errors that can occur during hull computation.
///
/// The first three variants are validation failures: they are reported before
/// any partitioning happens and leave the output buffers untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HullError {
    /// The coordinate buffer has odd length or holds fewer than 3 points.
    #[error("malformed input: coordinate buffer of length {len} (need an even length >= 6)")]
    MalformedInput { len: usize },

    /// The output coordinate buffer does not match the input length.
    #[error("capacity mismatch: output buffer holds {actual} values, expected {expected}")]
    CapacityMismatch { expected: usize, actual: usize },

    /// A required buffer was not supplied.
    #[error("missing {0} buffer")]
    MissingBuffer(BufferKind),

    /// Configuration rejected before starting (e.g. zero workers).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A task phase was invoked out of order.
    #[error("task phase out of order: expected {expected:?}, found {found:?}")]
    PhaseOrder {
        expected: TaskStage,
        found: TaskStage,
    },

    /// A peer hung up while this rank was exchanging messages.
    #[error("rank {rank} lost its connection to the cluster")]
    Disconnected { rank: usize },

    /// A worker thread panicked.
    #[error("a worker panicked during the distributed run")]
    WorkerPanicked,

    /// Internal computation failure.
    /// This should not happen with valid input and indicates a bug.
    #[error("computation failed: {0}")]
    ComputationFailed(String),
}

impl HullError {
    /// True for the errors raised by buffer validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            HullError::MalformedInput { .. }
                | HullError::CapacityMismatch { .. }
                | HullError::MissingBuffer(_)
        )
    }
}
