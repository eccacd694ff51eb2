use crate::clients::operations::{Dispatched, ResourceOperations};
use crate::dispatcher::{Dispatcher, LaneTicket, Lanes};
use crate::framework::descriptor::ResourceDescriptor;
use crate::framework::error::{FrameworkError, PipelineError};
use crate::framework::intent::{Intent, Operation};
use crate::pipeline::{Completion, OutcomePipeline};
use crate::signals::{Signal, SignalBus};
use crate::store::{StoreClient, StoreState};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info_span, instrument, Instrument};

/// Entry point for presentation code: dispatches operations and reads the store.
///
/// Cheap to clone; every clone shares the same lanes, store and signal bus.
#[derive(Clone)]
pub struct RemoteResourceClient {
    dispatcher: Arc<Dispatcher>,
    lanes: Arc<Lanes>,
    pipeline: OutcomePipeline,
    store: StoreClient,
    signals: SignalBus,
}

impl RemoteResourceClient {
    pub fn new(
        dispatcher: Dispatcher,
        lanes: Arc<Lanes>,
        store: StoreClient,
        signals: SignalBus,
    ) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            lanes,
            pipeline: OutcomePipeline::new(store.clone(), signals.clone()),
            store,
            signals,
        }
    }

    /// Current store contents.
    pub async fn snapshot(&self) -> Result<Arc<StoreState>, FrameworkError> {
        self.store.snapshot().await
    }

    /// Receiver notified on every store change.
    pub fn watch(&self) -> watch::Receiver<Arc<StoreState>> {
        self.store.watch()
    }

    /// Subscribes to follow-ups, processed records, failures and 401s.
    pub fn subscribe(&self) -> broadcast::Receiver<Signal> {
        self.signals.subscribe()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl ResourceOperations for RemoteResourceClient {
    /// Starts `operation` on its intent's lane, superseding any operation of the same
    /// intent still in flight, and runs it to completion on a spawned task.
    ///
    /// The lane is claimed before this returns, so operations of one intent are
    /// ordered by dispatch call order.
    #[instrument(skip(self, operation), fields(intent = %operation.intent()))]
    fn dispatch(&self, operation: Operation) -> Dispatched {
        let (intent, descriptor) = operation.into_parts();
        let ticket = self.lanes.begin(intent);
        debug!(generation = ticket.generation(), "Lane claimed");

        let span = info_span!(
            "resource",
            %intent,
            key = descriptor.resource_key(),
            generation = ticket.generation()
        );
        let dispatcher = self.dispatcher.clone();
        let pipeline = self.pipeline.clone();
        tokio::spawn(run(dispatcher, pipeline, intent, descriptor, ticket).instrument(span))
    }
}

async fn run(
    dispatcher: Arc<Dispatcher>,
    pipeline: OutcomePipeline,
    intent: Intent,
    descriptor: ResourceDescriptor,
    ticket: LaneTicket,
) -> Result<Completion, PipelineError> {
    let outcome = dispatcher.execute(intent, &descriptor).await;
    if !ticket.is_current() {
        debug!("Superseded while in flight; discarding response");
        return Ok(Completion::Superseded);
    }
    pipeline.process(intent, descriptor, outcome, &ticket).await
}
