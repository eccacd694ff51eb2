//! # Transport Adapter
//!
//! The dispatcher only needs one capability from the network: send a request,
//! get back a status code and a body. [`Transport`] captures that as an async trait
//! so the production [`HttpTransport`] and the test
//! [`MockTransport`](crate::framework::mock::MockTransport) are interchangeable.
//!
//! A transport makes a single attempt per call. There is no retry and no timeout
//! at this layer.

pub mod http;

pub use http::HttpTransport;

use crate::framework::error::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// HTTP method used by the five intents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One outgoing request, already shaped by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportRequest {
    pub method: Method,
    /// Path relative to the backend origin, e.g. `/qfx-api/v1/widgets/7`.
    pub url: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    /// Serialized JSON body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Overrides the transport interprets itself (e.g. `query`).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl TransportRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            options: Map::new(),
        }
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_json_body(mut self, body: Option<&Value>) -> Result<Self, serde_json::Error> {
        self.body = body.map(serde_json::to_string).transpose()?;
        Ok(self)
    }

    /// Merges caller overrides into the request.
    ///
    /// - `headers`: an object of strings; replaces the request headers wholesale.
    /// - `body`: any JSON value; replaces the serialized body.
    /// - anything else is kept in [`TransportRequest::options`] for the transport.
    pub fn merge_options(mut self, options: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        for (key, value) in options {
            match key.as_str() {
                "headers" => {
                    self.headers = serde_json::from_value(value.clone())?;
                }
                "body" => {
                    self.body = Some(serde_json::to_string(value)?);
                }
                _ => {
                    debug!(option = %key, "Forwarding transport option");
                    self.options.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(self)
    }
}

/// What came back: a status code and the body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for statuses in `200..=299`.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// The network capability the dispatcher depends on.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
