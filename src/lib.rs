//! # Remote Resource
//!
//! > **A client-side synchronization layer for one REST backend.**
//!
//! Five intents (GET, LIST, CREATE, UPDATE, DELETE) become HTTP calls; their
//! results are folded into a keyed in-memory store that presentation code reads.
//!
//! ## 🏗️ Pipeline
//!
//! ```text
//! ResourceDescriptor ─► Lanes (latest-wins per intent)
//!                         │
//!                         ▼
//!                     Dispatcher ─► Transport ─► Outcome
//!                                                  │
//!                                                  ▼
//!                     OutcomePipeline: transform ─► follow-ups ─► processed
//!                                                                  │
//!                                                                  ▼
//!                     StoreActor: reduce(state, event) ─► watch / snapshot
//! ```
//!
//! ## 🚀 Core Concepts
//!
//! ### Failures are values
//! A 500, a dropped connection or an unparsable body is an [`Outcome`](framework::Outcome)
//! that flows through the transformer and lands in the store under the operation's
//! key. Only a pipeline that cannot produce a record at all (no transformer, or a
//! transformer error) is treated as exceptional; it goes to the store's `error` slot.
//!
//! ### Latest wins, per intent
//! Starting a LIST while another LIST is in flight makes the older one's result
//! irrelevant: it will never reach the store. A GET never supersedes a LIST.
//!
//! ### One owner for state
//! The store lives inside one actor task. Readers get immutable
//! `Arc<StoreState>` snapshots, either on demand or through a `watch` channel.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`]: intents, descriptors, outcomes, errors, test mock.
//! - [`transport`]: the transport trait and its `reqwest` implementation.
//! - [`dispatcher`]: intent → request shape → outcome; the per-intent lanes.
//! - [`pipeline`]: transformer, follow-ups, processed event.
//! - [`store`]: the reducer and the actor that owns the state.
//! - [`signals`]: broadcast bus for follow-ups, records, failures and 401s.
//! - [`clients`]: [`RemoteResourceClient`](clients::RemoteResourceClient), the public surface.
//! - [`lifecycle`]: [`ResourceSystem`](lifecycle::ResourceSystem) wiring and tracing setup.
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod dispatcher;
pub mod framework;
pub mod lifecycle;
pub mod pipeline;
pub mod signals;
pub mod store;
pub mod transport;
