//! Webhook events.
//!
//! An [`Event`] is built only to be serialized and sent; nothing keeps it
//! afterwards. The wire shape is `{"event": <name>, "payload": {...}}`.

use serde::Serialize;
use serde_json::{Value, json};

use crate::stack::StackId;

/// Event names emitted during a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    StackStarting,
    StackFailed,
    StackSequenceComplete,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StackStarting => "stack_starting",
            Self::StackFailed => "stack_failed",
            Self::StackSequenceComplete => "stack_sequence_complete",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Event {
    #[serde(rename = "event")]
    pub kind: EventKind,
    pub payload: Value,
}

impl Event {
    pub fn new(kind: EventKind, payload: Value) -> Self {
        Self { kind, payload }
    }

    pub fn stack_starting(stack_id: StackId) -> Self {
        Self::new(EventKind::StackStarting, json!({ "stack_id": stack_id }))
    }

    pub fn stack_failed(stack_id: StackId, message: impl Into<String>) -> Self {
        Self::new(
            EventKind::StackFailed,
            json!({ "stack_id": stack_id, "message": message.into() }),
        )
    }

    pub fn sequence_complete(stacks: &[StackId]) -> Self {
        Self::new(EventKind::StackSequenceComplete, json!({ "stacks": stacks }))
    }

    /// The `stack_id` payload field, when the event carries one.
    pub fn stack_id(&self) -> Option<StackId> {
        self.payload.get("stack_id").and_then(Value::as_i64)
    }
}
