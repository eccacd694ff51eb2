//! # Store Actor
//!
//! The store is the only shared mutable resource in the system, so it lives inside
//! one task. [`StoreActor`] owns the current [`StoreState`] and the receiving end of
//! its channel, and handles requests one at a time: no `Mutex` around the state is
//! needed because nothing else can reach it.
//!
//! ## Requests
//!
//! * **Apply**:
//!     1. Drops the event if its lane ticket has been superseded.
//!     2. Runs the [`reduce`] function over the current snapshot.
//!     3. Publishes the new snapshot on the `watch` channel.
//!     4. Replies whether the event was applied.
//!
//! * **Snapshot**: replies with the current `Arc<StoreState>`.

use super::reducer::reduce;
use super::{StoreEvent, StoreState};
use crate::dispatcher::LaneTicket;
use crate::framework::error::FrameworkError;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<T>;

/// Messages accepted by the [`StoreActor`].
#[derive(Debug)]
pub enum StoreRequest {
    Apply {
        event: StoreEvent,
        ticket: Option<LaneTicket>,
        respond_to: Response<bool>,
    },
    Snapshot {
        respond_to: Response<Arc<StoreState>>,
    },
}

/// Owner of the store state.
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    state: Arc<StoreState>,
    publisher: watch::Sender<Arc<StoreState>>,
}

impl StoreActor {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the capacity of the request channel; senders wait when it
    /// is full.
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let state = Arc::new(StoreState::new());
        let (publisher, watcher) = watch::channel(state.clone());
        let actor = Self {
            receiver,
            state,
            publisher,
        };
        (actor, StoreClient { sender, watcher })
    }

    /// Processes requests until every client is dropped.
    pub async fn run(mut self) {
        info!("Store started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                StoreRequest::Apply {
                    event,
                    ticket,
                    respond_to,
                } => {
                    if let Some(ticket) = ticket.as_ref().filter(|t| !t.is_current()) {
                        debug!(
                            intent = %ticket.intent(),
                            generation = ticket.generation(),
                            "Dropping superseded event"
                        );
                        let _ = respond_to.send(false);
                        continue;
                    }

                    match &event {
                        StoreEvent::Processed(record) => {
                            info!(key = %record.key, intent = %record.action_type, "Applied")
                        }
                        StoreEvent::Failed(error) => info!(%error, "Recorded error"),
                    }
                    self.state = Arc::new(reduce(&self.state, &event));
                    self.publisher.send_replace(self.state.clone());
                    debug!(size = self.state.len(), "Store updated");
                    let _ = respond_to.send(true);
                }
                StoreRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.state.clone());
                }
            }
        }

        info!(size = self.state.len(), "Shutdown");
    }
}

/// Cloneable handle to the [`StoreActor`].
#[derive(Clone, Debug)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
    watcher: watch::Receiver<Arc<StoreState>>,
}

impl StoreClient {
    /// Sends an event to the reducer. Returns `false` if it was dropped as stale.
    pub async fn apply(
        &self,
        event: StoreEvent,
        ticket: Option<LaneTicket>,
    ) -> Result<bool, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Apply {
                event,
                ticket,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    pub async fn snapshot(&self) -> Result<Arc<StoreState>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }

    /// A receiver that observes every new snapshot.
    pub fn watch(&self) -> watch::Receiver<Arc<StoreState>> {
        self.watcher.clone()
    }
}
