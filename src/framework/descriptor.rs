//! # Resource Descriptor
//!
//! The request object that describes one operation: where it goes, what it sends,
//! which store slot receives the result, and how the raw outcome is turned into
//! stored content.

use crate::framework::error::TransformError;
use crate::framework::outcome::Outcome;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied function turning an [`Outcome`] into store content.
///
/// It receives the outcome as-is (success, failure, raw response...) and is
/// responsible for branching on its shape.
pub type ResponseTransformer =
    Arc<dyn Fn(Outcome) -> Result<Value, TransformError> + Send + Sync + 'static>;

/// A follow-up signal emitted after the network call resolves and before the
/// processed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl FollowUp {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Describes one resource operation.
///
/// `path` and `resource_key` are required; everything else is optional. The
/// response transformer has no default: a descriptor dispatched without one fails
/// in the pipeline. Use [`transformers::identity`](crate::framework::transformers::identity)
/// to store outcomes unchanged.
///
/// ```rust
/// use remote_resource::framework::{transformers, FollowUp, ResourceDescriptor};
/// use serde_json::json;
///
/// let descriptor = ResourceDescriptor::new("widgets", "widget7")
///     .with_id("7")
///     .with_header("Accept", "application/json")
///     .with_body(json!({ "name": "X" }))
///     .with_transformer(transformers::identity)
///     .with_on_complete(FollowUp::new("widgets:refreshed"));
///
/// assert_eq!(descriptor.id(), Some("7"));
/// assert!(descriptor.has_transformer());
/// ```
#[derive(Clone)]
pub struct ResourceDescriptor {
    path: String,
    id: Option<String>,
    headers: HashMap<String, String>,
    body: Option<Value>,
    options: Map<String, Value>,
    resource_key: String,
    response_transformer: Option<ResponseTransformer>,
    on_complete_actions: Vec<FollowUp>,
}

impl ResourceDescriptor {
    pub fn new(path: impl Into<String>, resource_key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            id: None,
            headers: HashMap::new(),
            body: None,
            options: Map::new(),
            resource_key: resource_key.into(),
            response_transformer: None,
            on_complete_actions: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets one transport override. See [`TransportRequest::merge_options`](crate::transport::TransportRequest::merge_options)
    /// for the keys that are understood.
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = options;
        self
    }

    pub fn with_transformer<F>(mut self, transformer: F) -> Self
    where
        F: Fn(Outcome) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        self.response_transformer = Some(Arc::new(transformer));
        self
    }

    /// Appends a follow-up signal. Signals are emitted in insertion order.
    pub fn with_on_complete(mut self, follow_up: FollowUp) -> Self {
        self.on_complete_actions.push(follow_up);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn resource_key(&self) -> &str {
        &self.resource_key
    }

    pub fn has_transformer(&self) -> bool {
        self.response_transformer.is_some()
    }

    pub fn transformer(&self) -> Option<&ResponseTransformer> {
        self.response_transformer.as_ref()
    }

    pub fn on_complete_actions(&self) -> &[FollowUp] {
        &self.on_complete_actions
    }
}

impl fmt::Debug for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceDescriptor")
            .field("path", &self.path)
            .field("id", &self.id)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("options", &self.options)
            .field("resource_key", &self.resource_key)
            .field("response_transformer", &self.has_transformer())
            .field("on_complete_actions", &self.on_complete_actions)
            .finish()
    }
}
