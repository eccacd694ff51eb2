//! # Outcome Pipeline
//!
//! Takes the outcome of a dispatched operation and turns it into exactly one
//! store event. Steps run strictly in this order:
//!
//! 1. apply the descriptor's response transformer to the raw outcome;
//! 2. build the [`ProcessedRecord`] (key, path, content, intent, id);
//! 3. emit each follow-up signal, in order, one at a time;
//! 4. emit the processed record: to the store, then on the signal bus.
//!
//! A missing transformer or a transformer error ends the run with a
//! [`PipelineError`]. No record is produced; the store receives a `Failed` event
//! instead and its `error` slot is set.
//!
//! The lane ticket is checked before every emission. A superseded run stops at the
//! first check it fails and reports [`Completion::Superseded`].

use crate::dispatcher::LaneTicket;
use crate::framework::descriptor::ResourceDescriptor;
use crate::framework::error::PipelineError;
use crate::framework::intent::Intent;
use crate::framework::outcome::{Outcome, ProcessedRecord};
use crate::signals::{Signal, SignalBus};
use crate::store::{StoreClient, StoreEvent};
use tokio::task;
use tracing::{debug, info, warn};

/// How a pipeline run ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The processed record reached the store.
    Applied,
    /// A newer operation of the same intent started first; nothing was applied.
    Superseded,
}

/// Routes outcomes to the store and the signal bus.
#[derive(Clone, Debug)]
pub struct OutcomePipeline {
    store: StoreClient,
    signals: SignalBus,
}

impl OutcomePipeline {
    pub fn new(store: StoreClient, signals: SignalBus) -> Self {
        Self { store, signals }
    }

    /// Runs the four steps for one operation.
    pub async fn process(
        &self,
        intent: Intent,
        descriptor: ResourceDescriptor,
        outcome: Outcome,
        ticket: &LaneTicket,
    ) -> Result<Completion, PipelineError> {
        if !ticket.is_current() {
            return Ok(superseded(ticket));
        }

        let key = descriptor.resource_key().to_string();
        let content = match descriptor.transformer() {
            Some(transformer) => transformer(outcome).map_err(|source| PipelineError::Transform {
                key: key.clone(),
                source,
            }),
            None => Err(PipelineError::MissingTransformer { key: key.clone() }),
        };
        let content = match content {
            Ok(content) => content,
            Err(error) => return self.fail(error, ticket).await,
        };

        let record = ProcessedRecord {
            key,
            path: descriptor.path().to_string(),
            content,
            action_type: intent,
            identifier: descriptor.id().map(str::to_string),
        };

        for follow_up in descriptor.on_complete_actions() {
            if !ticket.is_current() {
                return Ok(superseded(ticket));
            }
            debug!(signal = %follow_up.name, "Emitting follow-up");
            self.signals.publish(Signal::FollowUp(follow_up.clone()));
            task::yield_now().await;
        }

        if !ticket.is_current() {
            return Ok(superseded(ticket));
        }
        let applied = self
            .store
            .apply(StoreEvent::Processed(record.clone()), Some(ticket.clone()))
            .await?;
        if !applied {
            return Ok(superseded(ticket));
        }

        info!(key = %record.key, %intent, "Processed");
        self.signals.publish(Signal::Processed(record));
        Ok(Completion::Applied)
    }

    async fn fail(
        &self,
        error: PipelineError,
        ticket: &LaneTicket,
    ) -> Result<Completion, PipelineError> {
        let applied = self
            .store
            .apply(StoreEvent::Failed(error.clone()), Some(ticket.clone()))
            .await?;
        if !applied {
            return Ok(superseded(ticket));
        }
        warn!(%error, intent = %ticket.intent(), "Pipeline failed");
        self.signals.publish(Signal::PipelineFailed(error.clone()));
        Err(error)
    }
}

fn superseded(ticket: &LaneTicket) -> Completion {
    debug!(
        intent = %ticket.intent(),
        generation = ticket.generation(),
        "Superseded"
    );
    Completion::Superseded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::Lanes;
    use crate::framework::descriptor::FollowUp;
    use crate::framework::error::TransformError;
    use crate::framework::transformers;
    use crate::store::StoreActor;
    use serde_json::json;

    fn pipeline() -> (OutcomePipeline, StoreClient, SignalBus) {
        let (actor, store) = StoreActor::new(8);
        tokio::spawn(actor.run());
        let signals = SignalBus::new(16);
        (
            OutcomePipeline::new(store.clone(), signals.clone()),
            store,
            signals,
        )
    }

    #[tokio::test]
    async fn test_follow_ups_precede_processed() {
        let (pipeline, store, signals) = pipeline();
        let mut rx = signals.subscribe();
        let lanes = Lanes::new();
        let ticket = lanes.begin(Intent::Create);
        let descriptor = ResourceDescriptor::new("widgets", "widgets")
            .with_transformer(transformers::identity)
            .with_on_complete(FollowUp::new("first"))
            .with_on_complete(FollowUp::new("second").with_payload(json!(2)));

        let completion = pipeline
            .process(Intent::Create, descriptor, Outcome::Success(json!({ "id": 1 })), &ticket)
            .await
            .unwrap();

        assert_eq!(completion, Completion::Applied);
        assert_eq!(rx.recv().await.unwrap(), Signal::FollowUp(FollowUp::new("first")));
        assert_eq!(
            rx.recv().await.unwrap(),
            Signal::FollowUp(FollowUp::new("second").with_payload(json!(2)))
        );
        match rx.recv().await.unwrap() {
            Signal::Processed(record) => {
                assert_eq!(record.key, "widgets");
                assert_eq!(record.action_type, Intent::Create);
            }
            other => panic!("expected processed, got {other:?}"),
        }
        let state = store.snapshot().await.unwrap();
        assert_eq!(state.get("widgets"), Some(&json!({ "id": 1 })));
    }

    #[tokio::test]
    async fn test_transformer_sees_raw_outcome() {
        let (pipeline, store, _signals) = pipeline();
        let lanes = Lanes::new();
        let ticket = lanes.begin(Intent::Get);
        let descriptor = ResourceDescriptor::new("widgets", "w").with_transformer(|outcome| {
            Ok(json!({ "failed": outcome.is_failure() }))
        });

        pipeline
            .process(Intent::Get, descriptor, Outcome::failure("nope", Some(404)), &ticket)
            .await
            .unwrap();

        let state = store.snapshot().await.unwrap();
        assert_eq!(state.get("w"), Some(&json!({ "failed": true })));
    }

    #[tokio::test]
    async fn test_missing_transformer_records_error() {
        let (pipeline, store, signals) = pipeline();
        let mut rx = signals.subscribe();
        let lanes = Lanes::new();
        let ticket = lanes.begin(Intent::Get);
        let descriptor = ResourceDescriptor::new("widgets", "w")
            .with_on_complete(FollowUp::new("never"));

        let err = pipeline
            .process(Intent::Get, descriptor, Outcome::Success(json!(1)), &ticket)
            .await
            .unwrap_err();

        let expected = PipelineError::MissingTransformer { key: "w".into() };
        assert_eq!(err, expected);
        assert_eq!(rx.recv().await.unwrap(), Signal::PipelineFailed(expected.clone()));
        let state = store.snapshot().await.unwrap();
        assert!(state.is_empty());
        assert_eq!(state.error(), Some(&expected));
    }

    #[tokio::test]
    async fn test_transformer_error_propagates() {
        let (pipeline, store, _signals) = pipeline();
        let lanes = Lanes::new();
        let ticket = lanes.begin(Intent::List);
        let descriptor = ResourceDescriptor::new("widgets", "w")
            .with_transformer(|_| Err(TransformError::from("bad shape")));

        let err = pipeline
            .process(Intent::List, descriptor, Outcome::Success(json!([])), &ticket)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Transform { .. }));
        assert!(store.snapshot().await.unwrap().error().is_some());
    }

    #[tokio::test]
    async fn test_failure_of_superseded_run_is_dropped() {
        let (pipeline, store, signals) = pipeline();
        let mut rx = signals.subscribe();
        let lanes = Lanes::new();
        let ticket = lanes.begin(Intent::Get);
        let restart = lanes.clone();
        // A newer GET starts while the transformer is running.
        let descriptor = ResourceDescriptor::new("widgets", "w").with_transformer(move |_| {
            restart.begin(Intent::Get);
            Err(TransformError::from("bad shape"))
        });

        let completion = pipeline
            .process(Intent::Get, descriptor, Outcome::Success(json!(1)), &ticket)
            .await
            .unwrap();

        assert_eq!(completion, Completion::Superseded);
        assert!(rx.try_recv().is_err());
        assert!(store.snapshot().await.unwrap().error().is_none());
    }

    #[tokio::test]
    async fn test_stale_ticket_emits_nothing() {
        let (pipeline, store, signals) = pipeline();
        let mut rx = signals.subscribe();
        let lanes = Lanes::new();
        let stale = lanes.begin(Intent::Update);
        let _newer = lanes.begin(Intent::Update);
        let descriptor = ResourceDescriptor::new("widgets", "w")
            .with_transformer(transformers::identity)
            .with_on_complete(FollowUp::new("never"));

        let completion = pipeline
            .process(Intent::Update, descriptor, Outcome::Success(json!(1)), &stale)
            .await
            .unwrap();

        assert_eq!(completion, Completion::Superseded);
        assert!(rx.try_recv().is_err());
        assert!(store.snapshot().await.unwrap().is_empty());
    }
}
