//! In-process SPMD cluster: ranks, blocking point-to-point messages, launcher.
//!
//! Every rank owns one inbox. Channels are rendezvous (`bounded(0)`), so a
//! `send` returns only once the destination has taken the message, and `recv`
//! blocks until a message arrives. A rank never sends to itself.

use crossbeam::channel::{self, Receiver, Sender};
use log::trace;

use crate::{HullError, Point};

/// Rank that owns the global input and output buffers.
pub const ROOT: usize = 0;

/// Payloads exchanged between ranks.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Total number of points in the run (broadcast by the root).
    Count(usize),
    /// A rank's slice of the input.
    Chunk(Vec<Point>),
    /// A rank's partial hull, sent back to the root.
    Partial(Vec<Point>),
}

impl Message {
    fn kind(&self) -> &'static str {
        match self {
            Message::Count(_) => "count",
            Message::Chunk(_) => "chunk",
            Message::Partial(_) => "partial",
        }
    }
}

/// A received message tagged with its sender.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub source: usize,
    pub message: Message,
}

/// Blocking message passing between the ranks of one run.
pub trait Communicator {
    fn rank(&self) -> usize;

    /// Number of ranks in the run.
    fn size(&self) -> usize;

    /// Send `message` to `dest`, blocking until it is taken.
    fn send(&self, dest: usize, message: Message) -> Result<(), HullError>;

    /// Block until a message from any rank arrives.
    fn recv(&self) -> Result<Envelope, HullError>;

    #[inline]
    fn is_root(&self) -> bool {
        self.rank() == ROOT
    }
}

/// Channel-backed communicator handed to each rank by [`LocalCluster`].
pub struct ChannelComm {
    rank: usize,
    // None at our own rank.
    peers: Vec<Option<Sender<Envelope>>>,
    inbox: Receiver<Envelope>,
}

impl Communicator for ChannelComm {
    #[inline]
    fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    fn size(&self) -> usize {
        self.peers.len()
    }

    fn send(&self, dest: usize, message: Message) -> Result<(), HullError> {
        let peer = self
            .peers
            .get(dest)
            .and_then(Option::as_ref)
            .ok_or_else(|| {
                HullError::ComputationFailed(format!(
                    "rank {} cannot send to rank {} (cluster size {})",
                    self.rank,
                    dest,
                    self.size()
                ))
            })?;
        trace!("rank {} -> rank {}: {}", self.rank, dest, message.kind());
        peer.send(Envelope {
            source: self.rank,
            message,
        })
        .map_err(|_| HullError::Disconnected { rank: dest })
    }

    fn recv(&self) -> Result<Envelope, HullError> {
        let envelope = self
            .inbox
            .recv()
            .map_err(|_| HullError::Disconnected { rank: self.rank })?;
        trace!(
            "rank {} <- rank {}: {}",
            self.rank,
            envelope.source,
            envelope.message.kind()
        );
        Ok(envelope)
    }
}

/// A fixed-size group of ranks running on scoped threads.
#[derive(Debug, Clone, Copy)]
pub struct LocalCluster {
    size: usize,
}

impl LocalCluster {
    pub fn new(size: usize) -> Result<Self, HullError> {
        if size == 0 {
            return Err(HullError::InvalidConfig(
                "cluster needs at least one rank".to_string(),
            ));
        }
        Ok(Self { size })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Build one communicator per rank, fully connected.
    pub fn communicators(&self) -> Vec<ChannelComm> {
        let (senders, receivers): (Vec<_>, Vec<_>) =
            (0..self.size).map(|_| channel::bounded(0)).unzip();

        receivers
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| ChannelComm {
                rank,
                peers: senders
                    .iter()
                    .enumerate()
                    .map(|(dest, tx)| (dest != rank).then(|| tx.clone()))
                    .collect(),
                inbox,
            })
            .collect()
    }

    /// Run `body` on every rank concurrently; results come back in rank order.
    pub fn run<R, F>(&self, body: F) -> Result<Vec<R>, HullError>
    where
        F: Fn(ChannelComm) -> R + Sync,
        R: Send,
    {
        let comms = self.communicators();
        let body = &body;

        let joined = crossbeam::scope(|s| {
            let mut handles = Vec::with_capacity(comms.len());
            for comm in comms {
                let handle = s
                    .builder()
                    .name(format!("hull-rank-{}", comm.rank))
                    .spawn(move |_| body(comm))
                    .map_err(|e| HullError::ComputationFailed(format!("spawn failed: {}", e)))?;
                handles.push(handle);
            }
            let results: Vec<_> = handles.into_iter().map(|h| h.join()).collect();
            results
                .into_iter()
                .map(|r| r.map_err(|_| HullError::WorkerPanicked))
                .collect::<Result<Vec<R>, HullError>>()
        });

        joined.map_err(|_| HullError::WorkerPanicked)?
    }
}
