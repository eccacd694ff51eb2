//! # Signal Bus
//!
//! Everything the pipeline announces to the rest of the application goes through
//! one broadcast channel: caller-specified follow-ups, processed records, pipeline
//! failures, and the global "unauthenticated" signal raised on a 401.
//!
//! The bus is passed into the dispatcher and the pipeline at construction, so
//! tests can subscribe to exactly the bus a system uses. Publishing never blocks
//! and never fails: with no subscribers the signal is simply dropped.

use crate::framework::descriptor::FollowUp;
use crate::framework::error::PipelineError;
use crate::framework::outcome::ProcessedRecord;
use tokio::sync::broadcast;
use tracing::trace;

/// A signal observable by any subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// One of a descriptor's `on_complete_actions`.
    FollowUp(FollowUp),
    /// The processed record of a completed operation.
    Processed(ProcessedRecord),
    /// A pipeline run that could not produce a record.
    PipelineFailed(PipelineError),
    /// A 401 seen on the shared single-item read path.
    Unauthenticated,
}

/// Cloneable handle to the broadcast channel.
#[derive(Clone, Debug)]
pub struct SignalBus {
    sender: broadcast::Sender<Signal>,
}

impl SignalBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Signal> {
        self.sender.subscribe()
    }

    /// Fire-and-forget publish.
    pub fn publish(&self, signal: Signal) {
        let receivers = self.sender.send(signal).unwrap_or(0);
        trace!(receivers, "Signal published");
    }
}
