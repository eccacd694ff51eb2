//! The store reducer.

use super::{StoreEvent, StoreState};
use crate::framework::intent::Intent;

/// Folds one event into the state, returning the next state.
///
/// - `Failed` sets the `error` slot and leaves every key alone.
/// - `Processed` with [`Intent::Delete`] removes the record's key.
/// - `Processed` with any other intent overwrites the record's key with its content.
///
/// The input is never modified and the result depends only on the arguments.
pub fn reduce(state: &StoreState, event: &StoreEvent) -> StoreState {
    let mut next = state.clone();
    match event {
        StoreEvent::Failed(error) => {
            next.error = Some(error.clone());
        }
        StoreEvent::Processed(record) => match record.action_type {
            Intent::Delete => {
                next.entries.remove(&record.key);
            }
            Intent::Get | Intent::List | Intent::Create | Intent::Update => {
                next.entries.insert(record.key.clone(), record.content.clone());
            }
        },
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::error::PipelineError;
    use crate::framework::outcome::ProcessedRecord;
    use serde_json::{json, Value};

    fn record(key: &str, intent: Intent, content: Value) -> StoreEvent {
        StoreEvent::Processed(ProcessedRecord {
            key: key.into(),
            path: "widgets".into(),
            content,
            action_type: intent,
            identifier: Some("7".into()),
        })
    }

    fn seeded() -> StoreState {
        let state = reduce(&StoreState::new(), &record("a", Intent::List, json!([1, 2])));
        reduce(&state, &record("b", Intent::Get, json!({ "id": 7 })))
    }

    #[test]
    fn test_non_delete_sets_key() {
        for intent in [Intent::Get, Intent::List, Intent::Create, Intent::Update] {
            let next = reduce(&seeded(), &record("c", intent, json!("new")));
            assert_eq!(next.get("c"), Some(&json!("new")));
            assert_eq!(next.get("a"), Some(&json!([1, 2])));
            assert_eq!(next.get("b"), Some(&json!({ "id": 7 })));
        }
    }

    #[test]
    fn test_overwrites_existing_key() {
        let next = reduce(&seeded(), &record("a", Intent::Update, json!([3])));
        assert_eq!(next.get("a"), Some(&json!([3])));
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_delete_removes_only_its_key() {
        let before = seeded();
        let next = reduce(&before, &record("a", Intent::Delete, Value::Null));

        assert!(!next.contains_key("a"));
        assert_eq!(next.get("b"), before.get("b"));
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_delete_of_missing_key_is_noop() {
        let before = seeded();
        let next = reduce(&before, &record("zzz", Intent::Delete, Value::Null));
        assert_eq!(next, before);
    }

    #[test]
    fn test_failure_sets_error_slot_only() {
        let before = seeded();
        let error = PipelineError::MissingTransformer { key: "c".into() };
        let next = reduce(&before, &StoreEvent::Failed(error.clone()));

        assert_eq!(next.error(), Some(&error));
        assert_eq!(next.entries(), before.entries());
    }

    #[test]
    fn test_input_state_is_untouched() {
        let before = seeded();
        let snapshot = before.clone();
        let _ = reduce(&before, &record("a", Intent::Delete, Value::Null));
        assert_eq!(before, snapshot);
    }

    #[test]
    fn test_applying_twice_equals_once() {
        let event = record("a", Intent::Create, json!({ "x": 1 }));
        let once = reduce(&seeded(), &event);
        let twice = reduce(&once, &event);
        assert_eq!(once, twice);
    }
}
