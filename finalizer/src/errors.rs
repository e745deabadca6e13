//! Error types for the finalizer.
//!
//! The finalizer never reports an error upward: the caller's own error lives
//! in the [`ErrorSlot`](crate::slot::ErrorSlot) and task faults are swallowed.
//! [`TaskFault`] exists so that a [`FaultObserver`](crate::observer::FaultObserver)
//! or a [`FinalizeReport`](crate::report::FinalizeReport) can describe what
//! was swallowed.

use crate::task::TaskKind;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use thiserror::Error;

/// A panic raised by a single cleanup task and caught by the finalizer.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind} task #{index}{} panicked: {message}", label_suffix(.label))]
pub struct TaskFault {
    /// Which sequence the task was registered in.
    pub kind: TaskKind,
    /// Registration index of the task within its sequence.
    pub index: usize,
    /// Optional label given at registration.
    pub label: Option<String>,
    /// The panic message, if the payload was a string.
    pub message: String,
}

fn label_suffix(label: &Option<String>) -> String {
    label
        .as_deref()
        .map(|l| format!(" ({l})"))
        .unwrap_or_default()
}

impl TaskFault {
    /// Creates a new task fault.
    #[must_use]
    pub fn new(kind: TaskKind, index: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            label: None,
            message: message.into(),
        }
    }

    /// Sets the task label.
    #[must_use]
    pub fn with_label(mut self, label: Option<impl Into<String>>) -> Self {
        self.label = label.map(Into::into);
        self
    }

    /// Builds a fault from a payload returned by `catch_unwind`.
    #[must_use]
    pub fn from_panic(
        kind: TaskKind,
        index: usize,
        label: Option<&str>,
        payload: &(dyn Any + Send),
    ) -> Self {
        Self::new(kind, index, panic_message(payload)).with_label(label)
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("kind".to_string(), serde_json::json!(self.kind.as_str()));
        map.insert("index".to_string(), serde_json::json!(self.index));
        if let Some(ref label) = self.label {
            map.insert("label".to_string(), serde_json::json!(label));
        }
        map.insert("message".to_string(), serde_json::json!(self.message));
        map
    }
}

/// Extracts a readable message from a panic payload.
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}
