//! Runtime orchestration and lifecycle management.
//!
//! - [`ResourceSystem`] - wires transport, dispatcher, lanes, store actor and signal bus
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod resource_system;
pub mod tracing;

pub use resource_system::*;
pub use self::tracing::*;
