//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements [`Transport`] entirely in memory. Queue the
//! responses you expect, hand a clone to the system under test, then call
//! [`MockTransport::verify`] to make sure every expectation was consumed.
//!
//! ## When to use Mocks vs a Real Server
//!
//! | Feature | MockTransport | wiremock + HttpTransport |
//! |---------|---------------|--------------------------|
//! | **Speed** | Instant (in-memory) | Fast (loopback socket) |
//! | **Ordering control** | Gated responses | Fixed delays |
//! | **Use Case** | Pipeline, lanes, store | Wire format, headers |
//! | **Error Injection** | Easy (`fail`) | Hard (needs a dead port) |
//!
//! ## Controlling completion order
//!
//! Latest-wins behaviour is only observable when responses resolve out of order.
//! [`ExpectationBuilder::respond_when_released`] parks the request until the
//! returned [`Release`] is triggered:
//!
//! ```rust
//! use remote_resource::framework::mock::MockTransport;
//! use remote_resource::transport::{Method, Transport, TransportRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     let gate = mock
//!         .expect(Method::Get, "/qfx-api/v1/widgets")
//!         .respond_when_released(200, "[]");
//!
//!     let transport = mock.clone();
//!     let pending = tokio::spawn(async move {
//!         transport
//!             .send(TransportRequest::new(Method::Get, "/qfx-api/v1/widgets"))
//!             .await
//!     });
//!
//!     mock.wait_for_requests(1).await;
//!     gate.release();
//!
//!     let response = pending.await.unwrap().unwrap();
//!     assert_eq!(response.status, 200);
//!     mock.verify();
//! }
//! ```
//!
//! ## Testing Failure Scenarios
//!
//! ```rust
//! use remote_resource::framework::mock::MockTransport;
//! use remote_resource::transport::{Method, Transport, TransportRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Method::Delete, "/qfx-api/v1/widgets/7")
//!         .fail("connection reset");
//!
//!     let result = mock
//!         .send(TransportRequest::new(Method::Delete, "/qfx-api/v1/widgets/7"))
//!         .await;
//!     assert!(result.is_err());
//! }
//! ```

use crate::framework::error::TransportError;
use crate::transport::{Method, Transport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, Notify};
use tracing::debug;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Reply {
    Respond(TransportResponse),
    Fail(String),
}

struct Expectation {
    method: Method,
    url: String,
    reply: Reply,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<TransportRequest>,
    unexpected: Vec<String>,
}

/// In-memory transport with expectation tracking.
///
/// Expectations are matched by method and URL, oldest first, so two queued
/// responses for the same URL are handed out in the order they were queued.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
    arrived: Arc<Notify>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one request with `method` to `url`.
    pub fn expect(&self, method: Method, url: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            url: url.into(),
            state: self.state.clone(),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Waits until at least `count` requests have arrived.
    pub async fn wait_for_requests(&self, count: usize) {
        loop {
            let notified = self.arrived.notified();
            if self.state.lock().unwrap().requests.len() >= count {
                return;
            }
            notified.await;
        }
    }

    /// Panics if an expectation is left over or an unexpected request arrived.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let expectation = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request.clone());
            let position = state
                .expectations
                .iter()
                .position(|e| e.method == request.method && e.url == request.url);
            match position {
                Some(index) => state.expectations.remove(index),
                None => {
                    state
                        .unexpected
                        .push(format!("{} {}", request.method, request.url));
                    None
                }
            }
        };
        self.arrived.notify_waiters();

        let Some(expectation) = expectation else {
            return Err(TransportError::Connection(format!(
                "no expectation for {} {}",
                request.method, request.url
            )));
        };

        if let Some(gate) = expectation.gate {
            debug!(url = %expectation.url, "Holding response until released");
            // A dropped Release lets the response through.
            let _ = gate.await;
        }

        match expectation.reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(message) => Err(TransportError::Connection(message)),
        }
    }
}

/// Builder for one expectation.
pub struct ExpectationBuilder {
    method: Method,
    url: String,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    fn push(self, reply: Reply, gate: Option<oneshot::Receiver<()>>) {
        self.state.lock().unwrap().expectations.push_back(Expectation {
            method: self.method,
            url: self.url,
            reply,
            gate,
        });
    }

    /// Responds immediately with `status` and `body`.
    pub fn respond(self, status: u16, body: impl Into<String>) {
        self.push(Reply::Respond(TransportResponse::new(status, body)), None);
    }

    /// Responds immediately with a JSON body.
    pub fn respond_json(self, status: u16, body: Value) {
        self.respond(status, body.to_string());
    }

    /// Fails at the transport level.
    pub fn fail(self, message: impl Into<String>) {
        self.push(Reply::Fail(message.into()), None);
    }

    /// Responds once the returned [`Release`] is triggered (or dropped).
    pub fn respond_when_released(self, status: u16, body: impl Into<String>) -> Release {
        let (release, gate) = oneshot::channel();
        self.push(
            Reply::Respond(TransportResponse::new(status, body)),
            Some(gate),
        );
        Release(release)
    }
}

/// Lets a held response through.
pub struct Release(oneshot::Sender<()>);

impl Release {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}
