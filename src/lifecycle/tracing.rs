//! # Observability & Tracing
//!
//! Every stage logs through `tracing` with structured fields, so a single
//! operation can be followed end to end:
//!
//! - **Client**: a `resource` span per dispatched operation (`intent`, `key`,
//!   `generation`)
//! - **Dispatcher**: intent and descriptor on every invocation, status codes,
//!   transport failures, 401s
//! - **Lanes / Pipeline**: superseded runs, follow-up emission, pipeline failures
//! - **Store**: applied keys, dropped stale events, recorded errors
//!
//! ## Usage Examples
//!
//! ```bash
//! # One line per applied operation
//! RUST_LOG=info cargo test
//!
//! # Full descriptors and lane generations
//! RUST_LOG=remote_resource=debug cargo test
//! ```
//!
//! With `RUST_LOG=info` a GET followed by a superseded pair of LISTs reads:
//!
//! ```text
//! INFO resource{intent=GET key="widget7" generation=1}: Dispatching intent=GET key="widget7" path="widgets"
//! INFO Applied key=widget7 intent=GET
//! INFO resource{intent=GET key="widget7" generation=1}: Processed key=widget7 intent=GET
//! INFO resource{intent=LIST key="widgets" generation=1}: Dispatching intent=LIST key="widgets" path="widgets"
//! INFO resource{intent=LIST key="widgets" generation=2}: Dispatching intent=LIST key="widgets" path="widgets"
//! INFO Applied key=widgets intent=LIST
//! ```

/// Initializes structured logging, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
