//! Outcomes and processed records.

use crate::framework::intent::Intent;
use crate::transport::TransportResponse;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The result of one dispatcher invocation.
///
/// GET, LIST, CREATE and DELETE produce pre-parsed outcomes. UPDATE hands back the
/// transport response untouched as [`Outcome::Raw`] and leaves interpretation to the
/// response transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    /// Success-range status with a JSON body.
    Success(Value),
    /// Success-range status whose body did not parse. The parse error is the content.
    Malformed { error: String, body: String },
    /// Transport failure, non-success status, or unknown intent.
    Failure {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
    },
    /// 401 on the shared single-item read path. Carries no body.
    Unauthenticated,
    /// UPDATE's verbatim transport response.
    Raw(TransportResponse),
}

impl Outcome {
    pub fn failure(message: impl Into<String>, status: Option<u16>) -> Self {
        Outcome::Failure {
            message: message.into(),
            status,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure { .. })
    }

    /// Flattens the outcome into a JSON value suitable for the store.
    ///
    /// Failures keep their shape as `{"error": message, "status": code}` so readers
    /// can tell them apart from content.
    pub fn into_content(self) -> Value {
        match self {
            Outcome::Success(value) => value,
            Outcome::Malformed { error, body } => json!({ "error": error, "body": body }),
            Outcome::Failure { message, status } => json!({ "error": message, "status": status }),
            Outcome::Unauthenticated => Value::Null,
            Outcome::Raw(response) => json!({ "status": response.status, "body": response.body }),
        }
    }
}

/// Emitted once per completed operation and consumed once by the store reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    pub key: String,
    pub path: String,
    pub content: Value,
    pub action_type: Intent,
    pub identifier: Option<String>,
}
