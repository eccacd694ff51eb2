//! # Resource Store
//!
//! A flat mapping from resource key to content, plus a reserved `error` slot for
//! pipeline failures. The state is only ever replaced, never edited: the
//! [`reducer`] builds a new [`StoreState`] from the previous one and an event, and
//! the [`StoreActor`] publishes each new snapshot.

pub mod actor;
pub mod reducer;

pub use actor::{StoreActor, StoreClient, StoreRequest};
pub use reducer::reduce;

use crate::framework::error::PipelineError;
use crate::framework::outcome::ProcessedRecord;
use serde_json::Value;
use std::collections::BTreeMap;

/// An event the reducer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A completed operation.
    Processed(ProcessedRecord),
    /// A pipeline run that failed before producing a record.
    Failed(PipelineError),
}

/// Readable store contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub(crate) entries: BTreeMap<String, Value>,
    pub(crate) error: Option<PipelineError>,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last pipeline failure, if any.
    pub fn error(&self) -> Option<&PipelineError> {
        self.error.as_ref()
    }
}
