//! # Intents & Operations
//!
//! The five CRUD-style intents form a closed enumeration. Every call site that
//! branches on an intent (URL shape, response classification, store merge) matches
//! on [`Intent`] exhaustively, so adding a sixth intent is a compile error until
//! each of them is handled.

use crate::framework::descriptor::ResourceDescriptor;
use crate::framework::error::UnknownIntent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Intent {
    Get,
    List,
    Create,
    Update,
    Delete,
}

impl Intent {
    /// All intents, in lane order.
    pub const ALL: [Intent; 5] = [
        Intent::Get,
        Intent::List,
        Intent::Create,
        Intent::Update,
        Intent::Delete,
    ];

    /// The wire name used in logs and failure messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Get => "GET",
            Intent::List => "LIST",
            Intent::Create => "CREATE",
            Intent::Update => "UPDATE",
            Intent::Delete => "DELETE",
        }
    }

    /// Index of this intent's lane.
    pub(crate) fn lane(&self) -> usize {
        match self {
            Intent::Get => 0,
            Intent::List => 1,
            Intent::Create => 2,
            Intent::Update => 3,
            Intent::Delete => 4,
        }
    }

    /// Whether the request targets a single item (`{path}/{id}`).
    pub fn targets_item(&self) -> bool {
        match self {
            Intent::Get | Intent::Update | Intent::Delete => true,
            Intent::List | Intent::Create => false,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "GET" => Ok(Intent::Get),
            "LIST" => Ok(Intent::List),
            "CREATE" => Ok(Intent::Create),
            "UPDATE" => Ok(Intent::Update),
            "DELETE" => Ok(Intent::Delete),
            other => Err(UnknownIntent(other.to_string())),
        }
    }
}

/// A dispatchable unit of work: an intent and the descriptor it acts on.
///
/// Build one with the five constructors and hand it to
/// [`RemoteResourceClient::dispatch`](crate::clients::RemoteResourceClient::dispatch).
///
/// ```rust
/// use remote_resource::framework::{Intent, Operation, ResourceDescriptor};
///
/// let op = Operation::get(ResourceDescriptor::new("widgets", "widget7").with_id("7"));
/// assert_eq!(op.intent(), Intent::Get);
/// ```
#[derive(Debug)]
pub struct Operation {
    intent: Intent,
    descriptor: ResourceDescriptor,
}

impl Operation {
    pub fn new(intent: Intent, descriptor: ResourceDescriptor) -> Self {
        Self { intent, descriptor }
    }

    pub fn get(descriptor: ResourceDescriptor) -> Self {
        Self::new(Intent::Get, descriptor)
    }

    pub fn list(descriptor: ResourceDescriptor) -> Self {
        Self::new(Intent::List, descriptor)
    }

    pub fn create(descriptor: ResourceDescriptor) -> Self {
        Self::new(Intent::Create, descriptor)
    }

    pub fn update(descriptor: ResourceDescriptor) -> Self {
        Self::new(Intent::Update, descriptor)
    }

    pub fn delete(descriptor: ResourceDescriptor) -> Self {
        Self::new(Intent::Delete, descriptor)
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    pub fn into_parts(self) -> (Intent, ResourceDescriptor) {
        (self.intent, self.descriptor)
    }
}
