//! The caller-owned error slot.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A shared handle to the error a function is about to return.
///
/// The calling function creates the slot, hands a clone to its
/// [`Finalizer`](crate::Finalizer), and reads the final value when it
/// returns. Clones share the same cell. The handle is `!Send`: a slot
/// belongs to exactly one function activation on one thread.
///
/// Once a slot holds an error it can be replaced or complemented but never
/// cleared, so cleanup code cannot turn a failure into a success.
pub struct ErrorSlot<E> {
    inner: Rc<RefCell<Option<E>>>,
}

impl<E> ErrorSlot<E> {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(None)),
        }
    }

    /// Creates a slot already holding an error.
    #[must_use]
    pub fn with_error(error: E) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Some(error))),
        }
    }

    /// Returns true if the slot holds an error.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.inner.borrow().is_some()
    }

    /// Overwrites the slot with `error`.
    pub fn set(&self, error: E) {
        *self.inner.borrow_mut() = Some(error);
    }

    /// Stores the error of `result`, if any, and passes the value through.
    pub fn capture<T>(&self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.set(error);
                None
            }
        }
    }

    /// Returns true if both handles point at the same slot.
    #[must_use]
    pub fn same_slot(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<E: Clone> ErrorSlot<E> {
    /// Returns a copy of the current error.
    #[must_use]
    pub fn get(&self) -> Option<E> {
        self.inner.borrow().clone()
    }

    /// Combines `new` into the current error, or stores it if the slot is empty.
    ///
    /// The cell is not borrowed while `combine` runs. If `combine` panics the
    /// existing error stays in place.
    pub fn complement<F>(&self, combine: F, new: E)
    where
        F: FnOnce(E, E) -> E,
    {
        let merged = match self.get() {
            Some(existing) => combine(existing, new),
            None => new,
        };
        self.set(merged);
    }

    /// Turns the slot into the function's return value.
    ///
    /// Yields `Err` whenever the slot holds an error, even if `value` is
    /// present.
    pub fn into_result<T>(self, value: T) -> Result<T, E> {
        match self.get() {
            Some(error) => Err(error),
            None => Ok(value),
        }
    }
}

impl<E> Clone for ErrorSlot<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> Default for ErrorSlot<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: fmt::Debug> fmt::Debug for ErrorSlot<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(value) => f.debug_tuple("ErrorSlot").field(&*value).finish(),
            Err(_) => f.write_str("ErrorSlot(<borrowed>)"),
        }
    }
}
