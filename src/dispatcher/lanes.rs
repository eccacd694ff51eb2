//! # Concurrency Supervisor
//!
//! One latest-wins lane per intent. Starting an operation bumps its lane's
//! generation and hands back a [`LaneTicket`]; any older ticket for the same lane
//! stops being current at that moment. Lanes never affect each other.
//!
//! Cancellation is cooperative. A superseded operation's network call still runs
//! to completion, but every downstream step checks its ticket first and bails out
//! when it is stale.

use crate::framework::intent::Intent;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generation counters for the five lanes.
#[derive(Debug, Default)]
pub struct Lanes {
    generations: [AtomicU64; 5],
}

impl Lanes {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Opens a new generation on `intent`'s lane, superseding whatever ran there.
    pub fn begin(self: &Arc<Self>, intent: Intent) -> LaneTicket {
        let generation = self.generations[intent.lane()].fetch_add(1, Ordering::SeqCst) + 1;
        LaneTicket {
            intent,
            generation,
            lanes: Arc::clone(self),
        }
    }

    /// The newest generation started on `intent`'s lane (0 before any).
    pub fn current(&self, intent: Intent) -> u64 {
        self.generations[intent.lane()].load(Ordering::SeqCst)
    }
}

/// Proof that an operation was started on a lane, and at which generation.
#[derive(Debug, Clone)]
pub struct LaneTicket {
    intent: Intent,
    generation: u64,
    lanes: Arc<Lanes>,
}

impl LaneTicket {
    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `false` once a newer operation of the same intent has started.
    pub fn is_current(&self) -> bool {
        self.lanes.current(self.intent) == self.generation
    }
}
