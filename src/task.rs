//! Four-phase task over typed buffers: `validation`, `pre_processing`,
//! `run`, `post_processing`.
//!
//! Phases must be called in that order. Validation rejects a task before
//! anything is computed, and the output buffers are only touched by
//! `post_processing`.

use log::debug;

use crate::codec::{check_coord_len, decode_points};
use crate::coordinator::compute_distributed;
use crate::graham::graham_scan;
use crate::writer::{write_result, HullSink};
use crate::{BufferKind, Hull, HullConfig, HullError, Point};

/// How far a task has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskStage {
    Created,
    Validated,
    Preprocessed,
    Ran,
    Finished,
}

/// Which pipeline `run` uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Single Graham scan over the whole input.
    Sequential,
    /// Partition / local hull / merge on `HullConfig::workers` ranks.
    Distributed,
}

/// Input buffers. Only `inputs[0]` is read.
#[derive(Debug, Clone, Default)]
pub struct HullRequest<'a> {
    pub inputs: Vec<&'a [f64]>,
}

impl<'a> HullRequest<'a> {
    pub fn new(coords: &'a [f64]) -> Self {
        Self {
            inputs: vec![coords],
        }
    }
}

pub struct HullTask<'a> {
    request: HullRequest<'a>,
    sink: Option<HullSink<'a>>,
    mode: Mode,
    config: HullConfig,
    stage: TaskStage,
    points: &'a [Point],
    hull: Option<Hull>,
}

impl<'a> HullTask<'a> {
    pub fn new(
        request: HullRequest<'a>,
        sink: Option<HullSink<'a>>,
        mode: Mode,
        config: HullConfig,
    ) -> Self {
        Self {
            request,
            sink,
            mode,
            config,
            stage: TaskStage::Created,
            points: &[],
            hull: None,
        }
    }

    #[inline]
    pub fn stage(&self) -> TaskStage {
        self.stage
    }

    /// The computed hull, once `run` has completed.
    #[inline]
    pub fn hull(&self) -> Option<&Hull> {
        self.hull.as_ref()
    }

    /// Check buffer shapes without changing the task's stage.
    pub fn check(&self) -> Result<(), HullError> {
        let coords = self
            .request
            .inputs
            .first()
            .ok_or(HullError::MissingBuffer(BufferKind::Input))?;
        let sink = self
            .sink
            .as_ref()
            .ok_or(HullError::MissingBuffer(BufferKind::Output))?;
        check_coord_len(coords.len())?;
        if sink.capacity() != coords.len() {
            return Err(HullError::CapacityMismatch {
                expected: coords.len(),
                actual: sink.capacity(),
            });
        }
        Ok(())
    }

    /// Boolean form of [`HullTask::check`].
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    fn expect_stage(&self, expected: TaskStage) -> Result<(), HullError> {
        if self.stage != expected {
            return Err(HullError::PhaseOrder {
                expected,
                found: self.stage,
            });
        }
        Ok(())
    }

    fn advance(&mut self, expected: TaskStage, next: TaskStage) -> Result<(), HullError> {
        self.expect_stage(expected)?;
        self.stage = next;
        Ok(())
    }

    pub fn validation(&mut self) -> Result<(), HullError> {
        self.expect_stage(TaskStage::Created)?;
        self.check()?;
        self.config.check()?;
        self.stage = TaskStage::Validated;
        Ok(())
    }

    pub fn pre_processing(&mut self) -> Result<(), HullError> {
        self.advance(TaskStage::Validated, TaskStage::Preprocessed)?;
        let coords = self
            .request
            .inputs
            .first()
            .copied()
            .ok_or(HullError::MissingBuffer(BufferKind::Input))?;
        self.points = decode_points(coords)?;
        Ok(())
    }

    pub fn run(&mut self) -> Result<(), HullError> {
        self.advance(TaskStage::Preprocessed, TaskStage::Ran)?;
        let hull = match self.mode {
            Mode::Sequential => graham_scan(self.points, self.config.epsilon),
            Mode::Distributed => compute_distributed(self.points, &self.config)?.hull,
        };
        debug!(
            "{:?} task: {} points -> {} hull vertices",
            self.mode,
            self.points.len(),
            hull.len()
        );
        self.hull = Some(hull);
        Ok(())
    }

    pub fn post_processing(&mut self) -> Result<(), HullError> {
        self.advance(TaskStage::Ran, TaskStage::Finished)?;
        let hull = self
            .hull
            .as_ref()
            .ok_or_else(|| HullError::ComputationFailed("no hull to write".to_string()))?;
        let sink = self
            .sink
            .as_mut()
            .ok_or(HullError::MissingBuffer(BufferKind::Output))?;
        write_result(hull, sink)
    }

    /// Run all four phases in order.
    pub fn execute(&mut self) -> Result<(), HullError> {
        self.validation()?;
        self.pre_processing()?;
        self.run()?;
        self.post_processing()
    }
}
