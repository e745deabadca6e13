//! Testing utilities for code that registers cleanup tasks.
//!
//! This module provides:
//! - An execution recorder whose tasks log their own names
//! - Assertions on the recorded execution order

mod assertions;
mod recorder;

pub use assertions::{assert_not_run, assert_order, assert_ran_once};
pub use recorder::ExecutionRecorder;
