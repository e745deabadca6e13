//! Single-shot conditional helpers.
//!
//! These run one action immediately when a condition holds. They share the
//! conditions of [`Finalizer`](crate::Finalizer) but keep no registry: each
//! takes an optional reference and an action, and does nothing when the
//! reference is absent.

mod conditions;

pub use conditions::{always_with, exec_if_set, on_error, on_false, on_ok, on_true};
