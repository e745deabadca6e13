//! Ready-made combiners for [`Finalizer::complement_error`](crate::Finalizer::complement_error).
//!
//! A combiner receives the error already in the slot and the new one, and
//! returns what the slot should hold afterwards.

use std::error::Error;
use std::fmt;

/// Keeps the existing error and drops the new one.
pub fn keep_existing<E>(existing: E, _new: E) -> E {
    existing
}

/// Replaces the existing error with the new one.
pub fn keep_new<E>(_existing: E, new: E) -> E {
    new
}

/// Returns a combiner joining two string errors with `separator`.
pub fn join_with(separator: &str) -> impl Fn(String, String) -> String + '_ {
    move |existing, new| format!("{existing}{separator}{new}")
}

/// Joins two string errors as `existing:new`.
pub fn colon_join(existing: String, new: String) -> String {
    join_with(":")(existing, new)
}

/// An ordered list of errors, displayed joined with `"; "`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorList<E> {
    errors: Vec<E>,
}

impl<E> ErrorList<E> {
    /// Creates a list holding one error.
    #[must_use]
    pub fn single(error: E) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Appends all errors of `new` to `existing`. Usable as a combiner.
    #[must_use]
    pub fn combine(mut existing: Self, new: Self) -> Self {
        existing.errors.extend(new.errors);
        existing
    }

    /// The first error recorded.
    #[must_use]
    pub fn primary(&self) -> Option<&E> {
        self.errors.first()
    }

    /// All errors, in the order they were added.
    #[must_use]
    pub fn errors(&self) -> &[E] {
        &self.errors
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<E> From<E> for ErrorList<E> {
    fn from(error: E) -> Self {
        Self::single(error)
    }
}

impl<E: fmt::Display> fmt::Display for ErrorList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl<E: Error + 'static> Error for ErrorList<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.primary().map(|e| e as &(dyn Error + 'static))
    }
}
