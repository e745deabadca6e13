//! Records the order in which cleanup tasks run.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Hands out tasks that append their name to a shared log when run.
///
/// Clones share the same log.
#[derive(Clone, Default)]
pub struct ExecutionRecorder {
    log: Rc<RefCell<Vec<String>>>,
}

impl ExecutionRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry` to the log.
    pub fn record(&self, entry: impl Into<String>) {
        self.log.borrow_mut().push(entry.into());
    }

    /// Returns a task that records `name`.
    pub fn task(&self, name: &str) -> impl FnOnce() + 'static {
        let log = Rc::clone(&self.log);
        let name = name.to_string();
        move || log.borrow_mut().push(name)
    }

    /// Returns a failure task that records `name(error)`.
    pub fn failure_task<E: fmt::Display + 'static>(&self, name: &str) -> impl FnOnce(&E) + 'static {
        let log = Rc::clone(&self.log);
        let name = name.to_string();
        move |error: &E| log.borrow_mut().push(format!("{name}({error})"))
    }

    /// Returns a copy of the log.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Returns how many times `name` was recorded.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.log.borrow().iter().filter(|e| *e == name).count()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Clears the log.
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl fmt::Debug for ExecutionRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionRecorder")
            .field("entries", &self.log.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_share_log() {
        let rec = ExecutionRecorder::new();
        let first = rec.task("a");
        let second = rec.clone().failure_task::<&str>("b");

        first();
        second(&"oops");

        assert_eq!(rec.entries(), vec!["a".to_string(), "b(oops)".to_string()]);
        assert_eq!(rec.count("a"), 1);

        rec.clear();
        assert!(rec.is_empty());
    }
}
