//! Finalization reports.

use crate::errors::TaskFault;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which conditional sequence a finalization selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The slot was empty; success tasks ran.
    Success,
    /// The slot held an error; failure tasks ran.
    Failure,
    /// No slot was bound; only always tasks ran.
    Unbound,
    /// Dropped while panicking with an empty slot; only always tasks ran.
    Unwinding,
}

impl Outcome {
    /// Returns the snake_case name of the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Unbound => "unbound",
            Self::Unwinding => "unwinding",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a single finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizeReport {
    /// Which conditional sequence was selected.
    pub outcome: Outcome,
    /// Number of tasks invoked, faulted ones included.
    pub executed: usize,
    /// Faults caught, in execution order.
    pub faults: Vec<TaskFault>,
    /// Wall time spent running tasks.
    pub duration_ms: f64,
}

impl FinalizeReport {
    pub(crate) fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            executed: 0,
            faults: Vec::new(),
            duration_ms: 0.0,
        }
    }

    /// Returns true if any task panicked.
    #[must_use]
    pub fn has_faults(&self) -> bool {
        !self.faults.is_empty()
    }

    /// Number of tasks that completed without panicking.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.executed.saturating_sub(self.faults.len())
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("outcome".to_string(), serde_json::json!(self.outcome.as_str()));
        map.insert("executed".to_string(), serde_json::json!(self.executed));
        map.insert(
            "faults".to_string(),
            serde_json::Value::Array(
                self.faults
                    .iter()
                    .map(|f| {
                        serde_json::Value::Object(f.to_dict().into_iter().collect())
                    })
                    .collect(),
            ),
        );
        map.insert("duration_ms".to_string(), serde_json::json!(self.duration_ms));
        map
    }
}
