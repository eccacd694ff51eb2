//! Ready-made response transformers.
//!
//! None of these is applied implicitly; a descriptor must opt in with
//! [`ResourceDescriptor::with_transformer`](crate::framework::ResourceDescriptor::with_transformer).

use crate::dispatcher::classify;
use crate::framework::error::TransformError;
use crate::framework::intent::Intent;
use crate::framework::outcome::Outcome;
use serde_json::Value;

/// Stores the outcome as-is. See [`Outcome::into_content`].
pub fn identity(outcome: Outcome) -> Result<Value, TransformError> {
    Ok(outcome.into_content())
}

/// Like [`identity`], but a raw UPDATE response is first classified with the same
/// success-range rule the other intents use.
pub fn normalized(outcome: Outcome) -> Result<Value, TransformError> {
    let outcome = match outcome {
        Outcome::Raw(response) => classify(Intent::Update, response),
        other => other,
    };
    Ok(outcome.into_content())
}

/// Stores successful content only; any other outcome fails the pipeline run.
pub fn success_only(outcome: Outcome) -> Result<Value, TransformError> {
    match outcome {
        Outcome::Success(value) => Ok(value),
        Outcome::Failure { message, .. } => Err(TransformError(message)),
        Outcome::Malformed { error, .. } => Err(TransformError(error)),
        Outcome::Unauthenticated => Err(TransformError("unauthenticated".into())),
        Outcome::Raw(response) => Err(TransformError(format!(
            "unclassified response, status [{}]",
            response.status
        ))),
    }
}
