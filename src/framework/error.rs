//! # Framework Errors
//!
//! Domain-level failures (bad status, unparsable body, unknown intent) are not
//! errors here: they travel as [`Outcome`](crate::framework::Outcome) values and land
//! in the store under the operation's key. The types in this module cover what is
//! genuinely exceptional: a closed actor, a broken transport, a pipeline that
//! cannot produce a record.

/// Errors raised by the store actor plumbing.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}

/// Errors raised by a [`Transport`](crate::transport::Transport) implementation.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Error returned by a caller-supplied response transformer.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("{0}")]
pub struct TransformError(pub String);

impl From<String> for TransformError {
    fn from(msg: String) -> Self {
        TransformError(msg)
    }
}

impl From<&str> for TransformError {
    fn from(msg: &str) -> Self {
        TransformError(msg.to_string())
    }
}

/// An intent name outside the closed set.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("Unknown action type [{0}]")]
pub struct UnknownIntent(pub String);

/// Failures of the outcome pipeline itself.
///
/// These never reach the store under an operation's key; the store actor records
/// them in the reserved `error` slot instead.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum PipelineError {
    #[error("No response transformer supplied for resource `{key}`")]
    MissingTransformer { key: String },

    #[error("Response transformer for resource `{key}` failed: {source}")]
    Transform { key: String, source: TransformError },

    #[error("Store unavailable: {0}")]
    Store(#[from] FrameworkError),
}
