//! Distributed hull: scatter chunks, local Graham scans, gather, merge.
//!
//! Every rank runs [`run_worker`] in lockstep. Any vertex of the global hull
//! is extreme within whichever chunk holds it, so it survives into that
//! chunk's partial hull; a Graham scan over the union of partial hulls
//! therefore yields the same hull as a scan over the whole input.

use log::{debug, trace};

use crate::cluster::{Communicator, Envelope, LocalCluster, Message, ROOT};
use crate::codec::MIN_POINTS;
use crate::graham::{graham_scan, merge_scan};
use crate::partition::{chunk_len, chunk_range};
use crate::timing::{Timer, TimingBuilder};
use crate::{HullConfig, HullDiagnostics, HullError, HullOutput, Point};

/// Coordinator states, in the order every rank walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Idle,
    Distributing,
    ComputingLocal,
    Gathering,
    Merging,
    Done,
}

struct Worker<'c, C: Communicator> {
    comm: &'c C,
    epsilon: f64,
    phase: Phase,
}

impl<'c, C: Communicator> Worker<'c, C> {
    fn new(comm: &'c C, epsilon: f64) -> Self {
        Self {
            comm,
            epsilon,
            phase: Phase::Idle,
        }
    }

    fn enter(&mut self, next: Phase) {
        debug_assert!(next > self.phase, "{:?} -> {:?}", self.phase, next);
        if self.comm.is_root() {
            debug!("root: {:?} -> {:?}", self.phase, next);
        } else {
            trace!("rank {}: {:?} -> {:?}", self.comm.rank(), self.phase, next);
        }
        self.phase = next;
    }

    fn recv_from_root(&self) -> Result<Message, HullError> {
        let Envelope { source, message } = self.comm.recv()?;
        if source != ROOT {
            return Err(HullError::ComputationFailed(format!(
                "rank {} expected a message from the root, got one from rank {}",
                self.comm.rank(),
                source
            )));
        }
        Ok(message)
    }

    fn unexpected(&self, wanted: &str, got: &Message) -> HullError {
        HullError::ComputationFailed(format!(
            "rank {} expected {} during {:?}, got {:?}",
            self.comm.rank(),
            wanted,
            self.phase,
            got
        ))
    }

    fn run_root(mut self, points: &[Point]) -> Result<HullOutput, HullError> {
        if points.len() < MIN_POINTS {
            return Err(HullError::MalformedInput {
                len: 2 * points.len(),
            });
        }
        let n = points.len();
        let size = self.comm.size();
        let mut tb = TimingBuilder::new();

        self.enter(Phase::Distributing);
        let t = Timer::start();
        for dest in (0..size).filter(|&r| r != ROOT) {
            self.comm.send(dest, Message::Count(n))?;
            let chunk = points[chunk_range(n, size, dest)].to_vec();
            self.comm.send(dest, Message::Chunk(chunk))?;
        }
        tb.set_distribute(t.elapsed());

        self.enter(Phase::ComputingLocal);
        let t = Timer::start();
        let local = graham_scan(&points[chunk_range(n, size, ROOT)], self.epsilon);
        tb.set_local(t.elapsed());

        self.enter(Phase::Gathering);
        let t = Timer::start();
        let partials = self.gather(local.into_points())?;
        tb.set_gather(t.elapsed());

        self.enter(Phase::Merging);
        let t = Timer::start();
        let partial_sizes: Vec<usize> = partials.iter().map(Vec::len).collect();
        let union: Vec<Point> = partials.concat();
        let hull = merge_scan(&union, self.epsilon);
        tb.set_merge(t.elapsed());

        self.enter(Phase::Done);
        debug!(
            "root: n={} workers={} partial sizes={:?} merged {} candidates into {} vertices",
            n,
            size,
            partial_sizes,
            union.len(),
            hull.len()
        );
        tb.finish().report(n, size);

        Ok(HullOutput {
            hull,
            diagnostics: HullDiagnostics {
                workers: size,
                partial_sizes,
                merge_candidates: union.len(),
            },
        })
    }

    /// Collect one partial hull per rank, indexed by rank.
    fn gather(&self, own: Vec<Point>) -> Result<Vec<Vec<Point>>, HullError> {
        let size = self.comm.size();
        let mut slots: Vec<Option<Vec<Point>>> = vec![None; size];
        slots[ROOT] = Some(own);

        for _ in 1..size {
            let Envelope { source, message } = self.comm.recv()?;
            match message {
                Message::Partial(points) if source < size && slots[source].is_none() => {
                    trace!("root: partial hull of {} from rank {}", points.len(), source);
                    slots[source] = Some(points);
                }
                Message::Partial(_) => {
                    return Err(HullError::ComputationFailed(format!(
                        "unexpected partial hull from rank {}",
                        source
                    )));
                }
                other => return Err(self.unexpected("a partial hull", &other)),
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(rank, slot)| {
                slot.ok_or_else(|| {
                    HullError::ComputationFailed(format!("no partial hull from rank {}", rank))
                })
            })
            .collect()
    }

    fn run_member(mut self) -> Result<(), HullError> {
        let rank = self.comm.rank();
        let size = self.comm.size();

        self.enter(Phase::Distributing);
        let n = match self.recv_from_root()? {
            Message::Count(n) => n,
            other => return Err(self.unexpected("the point count", &other)),
        };
        let chunk = match self.recv_from_root()? {
            Message::Chunk(points) => points,
            other => return Err(self.unexpected("a chunk", &other)),
        };
        let expected = chunk_len(n, size, rank);
        if chunk.len() != expected {
            return Err(HullError::ComputationFailed(format!(
                "rank {} received {} points, expected {} of {}",
                rank,
                chunk.len(),
                expected,
                n
            )));
        }

        self.enter(Phase::ComputingLocal);
        let partial = graham_scan(&chunk, self.epsilon);
        drop(chunk);

        self.enter(Phase::Gathering);
        self.comm
            .send(ROOT, Message::Partial(partial.into_points()))?;

        self.enter(Phase::Done);
        Ok(())
    }
}

/// The per-rank body of a distributed hull run.
///
/// The root must pass `Some(points)` and gets `Some(output)` back; every
/// other rank passes `None` (any input it is given is ignored) and returns
/// `None` once its partial hull has been delivered.
pub fn run_worker<C: Communicator>(
    comm: &C,
    input: Option<&[Point]>,
    config: &HullConfig,
) -> Result<Option<HullOutput>, HullError> {
    let worker = Worker::new(comm, config.epsilon);
    if comm.is_root() {
        let points = input.ok_or(HullError::MissingBuffer(crate::BufferKind::Input))?;
        worker.run_root(points).map(Some)
    } else {
        worker.run_member().map(|()| None)
    }
}

/// Run the distributed pipeline on an in-process cluster of `config.workers` ranks.
pub fn compute_distributed(points: &[Point], config: &HullConfig) -> Result<HullOutput, HullError> {
    config.check()?;
    if points.len() < MIN_POINTS {
        return Err(HullError::MalformedInput {
            len: 2 * points.len(),
        });
    }

    let cluster = LocalCluster::new(config.workers)?;
    let results = cluster.run(|comm| {
        let input = comm.is_root().then_some(points);
        run_worker(&comm, input, config)
    })?;

    let mut root_output = None;
    for (rank, result) in results.into_iter().enumerate() {
        match result? {
            Some(output) if rank == ROOT => root_output = Some(output),
            Some(_) => {
                return Err(HullError::ComputationFailed(format!(
                    "rank {} produced a hull",
                    rank
                )))
            }
            None => {}
        }
    }
    root_output.ok_or_else(|| HullError::ComputationFailed("root produced no hull".to_string()))
}
