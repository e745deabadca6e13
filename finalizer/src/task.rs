//! Registered cleanup tasks and single-invocation fault isolation.

use crate::errors::TaskFault;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// The condition a task was registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Runs on every finalization.
    Always,
    /// Runs only when the error slot is empty.
    OnSuccess,
    /// Runs only when the error slot holds an error.
    OnFailure,
}

impl TaskKind {
    /// Returns the snake_case name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::OnSuccess => "on_success",
            Self::OnFailure => "on_failure",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zero-argument cleanup action.
pub type Task<'a> = Box<dyn FnOnce() + 'a>;

/// A cleanup action receiving the caller's error.
pub type FailureTask<'a, E> = Box<dyn FnOnce(&E) + 'a>;

/// A task together with its optional label.
pub(crate) struct Entry<T> {
    pub(crate) task: T,
    pub(crate) label: Option<String>,
}

impl<T> Entry<T> {
    pub(crate) fn new(task: T, label: Option<&str>) -> Self {
        Self {
            task,
            label: label.map(String::from),
        }
    }
}

/// Runs one task invocation, converting a panic into a [`TaskFault`].
pub(crate) fn run_isolated<F>(
    kind: TaskKind,
    index: usize,
    label: Option<&str>,
    invoke: F,
) -> Result<(), TaskFault>
where
    F: FnOnce(),
{
    catch_unwind(AssertUnwindSafe(invoke))
        .map_err(|payload| TaskFault::from_panic(kind, index, label, payload.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_kind_names() {
        assert_eq!(TaskKind::Always.to_string(), "always");
        assert_eq!(TaskKind::OnSuccess.as_str(), "on_success");
        assert_eq!(
            serde_json::to_value(TaskKind::OnFailure).unwrap(),
            serde_json::json!("on_failure")
        );
    }

    #[test]
    fn test_run_isolated_success() {
        let ran = Cell::new(false);
        let result = run_isolated(TaskKind::Always, 0, None, || ran.set(true));

        assert!(result.is_ok());
        assert!(ran.get());
    }

    #[test]
    fn test_run_isolated_captures_panic() {
        let fault = run_isolated(TaskKind::OnSuccess, 3, Some("flush"), || {
            panic!("disk full");
        })
        .unwrap_err();

        assert_eq!(fault.kind, TaskKind::OnSuccess);
        assert_eq!(fault.index, 3);
        assert_eq!(fault.label.as_deref(), Some("flush"));
        assert_eq!(fault.message, "disk full");
    }
}
