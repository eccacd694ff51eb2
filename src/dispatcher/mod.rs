//! # Operation Dispatcher
//!
//! Turns an [`Intent`] plus a [`ResourceDescriptor`] into exactly one transport
//! call and exactly one [`Outcome`].
//!
//! | intent | method | url                      | body | options |
//! |--------|--------|--------------------------|------|---------|
//! | GET    | GET    | `{prefix}/{path}/{id}`   |      | yes     |
//! | LIST   | GET    | `{prefix}/{path}`        |      |         |
//! | CREATE | POST   | `{prefix}/{path}`        | JSON |         |
//! | UPDATE | PUT    | `{prefix}/{path}/{id}`   | JSON | yes     |
//! | DELETE | DELETE | `{prefix}/{path}/{id}`   |      |         |
//!
//! GET goes through [`Dispatcher::read_item`], which applies the shared
//! single-item rule (a 401 raises [`Signal::Unauthenticated`]). LIST, CREATE and
//! DELETE use [`classify`]. UPDATE returns the transport response untouched.
//!
//! Nothing in here returns an error: transport failures, bad statuses and
//! unparsable bodies all become outcome values.

pub mod lanes;

pub use lanes::{LaneTicket, Lanes};

use crate::framework::descriptor::ResourceDescriptor;
use crate::framework::error::TransportError;
use crate::framework::intent::Intent;
use crate::framework::outcome::Outcome;
use crate::signals::{Signal, SignalBus};
use crate::transport::{Method, Transport, TransportRequest, TransportResponse};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default wire prefix of the backend API.
pub const DEFAULT_API_PREFIX: &str = "/qfx-api/v1";

/// Maps intents onto transport calls.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    prefix: String,
    signals: SignalBus,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, prefix: impl Into<String>, signals: SignalBus) -> Self {
        Self {
            transport,
            prefix: prefix.into(),
            signals,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `{prefix}/{path}` for collection intents, `{prefix}/{path}/{id}` otherwise.
    pub fn url_for(&self, intent: Intent, descriptor: &ResourceDescriptor) -> Option<String> {
        let collection = format!(
            "{}/{}",
            self.prefix.trim_end_matches('/'),
            descriptor.path().trim_matches('/')
        );
        if intent.targets_item() {
            descriptor.id().map(|id| format!("{collection}/{id}"))
        } else {
            Some(collection)
        }
    }

    /// Runs one intent against the transport.
    pub async fn execute(&self, intent: Intent, descriptor: &ResourceDescriptor) -> Outcome {
        info!(%intent, key = descriptor.resource_key(), path = descriptor.path(), "Dispatching");
        debug!(%intent, ?descriptor, "Descriptor");

        match intent {
            Intent::Get => self.read_item(descriptor).await,
            Intent::List | Intent::Create | Intent::Delete => {
                match self.send(intent, descriptor).await {
                    Ok(response) => classify(intent, response),
                    Err(outcome) => outcome,
                }
            }
            Intent::Update => match self.send(intent, descriptor).await {
                Ok(response) => Outcome::Raw(response),
                Err(outcome) => outcome,
            },
        }
    }

    /// Runs an intent given by name. Unknown names yield a failure outcome.
    pub async fn execute_named(&self, name: &str, descriptor: &ResourceDescriptor) -> Outcome {
        match name.parse::<Intent>() {
            Ok(intent) => self.execute(intent, descriptor).await,
            Err(e) => {
                warn!(intent = name, ?descriptor, "Unknown intent");
                Outcome::failure(e.to_string(), None)
            }
        }
    }

    /// Single-item read with the shared classification rule.
    ///
    /// - 2xx: parsed body (a parse error becomes the content);
    /// - 401: publishes [`Signal::Unauthenticated`] and yields [`Outcome::Unauthenticated`];
    /// - anything else: a failure carrying the status.
    pub async fn read_item(&self, descriptor: &ResourceDescriptor) -> Outcome {
        let response = match self.send(Intent::Get, descriptor).await {
            Ok(response) => response,
            Err(outcome) => return outcome,
        };

        if response.status == 401 {
            warn!(key = descriptor.resource_key(), "Unauthenticated");
            self.signals.publish(Signal::Unauthenticated);
            return Outcome::Unauthenticated;
        }
        classify(Intent::Get, response)
    }

    fn build_request(
        &self,
        intent: Intent,
        url: String,
        descriptor: &ResourceDescriptor,
    ) -> Result<TransportRequest, TransportError> {
        let headers = descriptor.headers().clone();
        let request = match intent {
            Intent::Get => TransportRequest::new(Method::Get, url)
                .with_headers(headers)
                .merge_options(descriptor.options())?,
            Intent::List => TransportRequest::new(Method::Get, url).with_headers(headers),
            Intent::Create => TransportRequest::new(Method::Post, url)
                .with_headers(headers)
                .with_json_body(descriptor.body())?,
            Intent::Update => TransportRequest::new(Method::Put, url)
                .with_headers(headers)
                .with_json_body(descriptor.body())?
                .merge_options(descriptor.options())?,
            Intent::Delete => TransportRequest::new(Method::Delete, url).with_headers(headers),
        };
        Ok(request)
    }

    /// Shapes and sends the request. A failure to do either is already an outcome.
    async fn send(
        &self,
        intent: Intent,
        descriptor: &ResourceDescriptor,
    ) -> Result<TransportResponse, Outcome> {
        let Some(url) = self.url_for(intent, descriptor) else {
            warn!(%intent, path = descriptor.path(), "Missing resource id");
            return Err(Outcome::failure(
                format!("Failed to {intent}: missing resource id for [{}]", descriptor.path()),
                None,
            ));
        };

        let request = self
            .build_request(intent, url, descriptor)
            .map_err(|e| Outcome::failure(format!("Failed to {intent}: {e}"), None))?;

        match self.transport.send(request).await {
            Ok(response) => {
                debug!(%intent, status = response.status, "Response received");
                Ok(response)
            }
            Err(e) => {
                warn!(%intent, error = %e, "Transport failed");
                Err(Outcome::failure(format!("Failed to {intent}: {e}"), None))
            }
        }
    }
}

/// The success-range rule shared by LIST, CREATE and DELETE.
///
/// A status in `200..=299` parses the body; anything else is a failure carrying
/// the status.
pub fn classify(intent: Intent, response: TransportResponse) -> Outcome {
    if response.is_success() {
        parse_body(response.body)
    } else {
        warn!(%intent, status = response.status, "Non-success status");
        Outcome::failure(
            format!("Failed to {intent}, response status [{}].", response.status),
            Some(response.status),
        )
    }
}

/// Parses a success body. A parse error, including an empty body, becomes the
/// content instead of aborting.
fn parse_body(body: String) -> Outcome {
    match serde_json::from_str(&body) {
        Ok(value) => Outcome::Success(value),
        Err(e) => {
            debug!(error = %e, "Malformed success body");
            Outcome::Malformed {
                error: e.to_string(),
                body,
            }
        }
    }
}
