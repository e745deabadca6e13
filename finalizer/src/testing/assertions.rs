//! Test assertions on recorded task execution.

use super::ExecutionRecorder;

/// Asserts that exactly `expected` ran, in that order.
pub fn assert_order(recorder: &ExecutionRecorder, expected: &[&str]) {
    let actual = recorder.entries();
    assert_eq!(
        actual, expected,
        "Expected execution order {:?}, got {:?}",
        expected, actual
    );
}

/// Asserts that `name` ran exactly once.
pub fn assert_ran_once(recorder: &ExecutionRecorder, name: &str) {
    let count = recorder.count(name);
    assert_eq!(
        count, 1,
        "Expected '{}' to run once, ran {} times. Log: {:?}",
        name,
        count,
        recorder.entries()
    );
}

/// Asserts that `name` never ran.
pub fn assert_not_run(recorder: &ExecutionRecorder, name: &str) {
    assert!(
        recorder.count(name) == 0,
        "Expected '{}' not to run. Log: {:?}",
        name,
        recorder.entries()
    );
}
