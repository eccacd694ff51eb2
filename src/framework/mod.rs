//! Core vocabulary of the synchronization layer.
//!
//! # Main Components
//!
//! - [`Intent`] / [`Operation`] - the five operation kinds and the unit of work
//! - [`ResourceDescriptor`] - what an operation targets and where its result lands
//! - [`Outcome`] / [`ProcessedRecord`] - what the dispatcher and pipeline produce
//! - [`error`] - framework, transport and pipeline errors
//!
//! # Testing
//!
//! See [`mock`] module for an in-memory transport with expectations.

pub mod descriptor;
pub mod error;
pub mod intent;
pub mod mock;
pub mod outcome;
pub mod transformers;

// Re-export core types for convenience
pub use descriptor::{FollowUp, ResourceDescriptor, ResponseTransformer};
pub use error::{FrameworkError, PipelineError, TransformError, TransportError, UnknownIntent};
pub use intent::{Intent, Operation};
pub use outcome::{Outcome, ProcessedRecord};
