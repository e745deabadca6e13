//! Fault observers.
//!
//! A finalizer swallows task panics. Installing an observer through
//! [`FinalizerConfig::with_observer`](crate::FinalizerConfig::with_observer)
//! makes them visible without changing that policy.

use crate::errors::TaskFault;
use std::cell::RefCell;
use tracing::{debug, error, info, warn, Level};

/// Receives every task fault caught during finalization.
///
/// Implementations must not panic; a panic raised here is itself caught and
/// discarded.
#[cfg_attr(test, mockall::automock)]
pub trait FaultObserver {
    /// Called once per caught fault, in execution order.
    fn on_fault(&self, fault: &TaskFault);
}

/// An observer that discards all faults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpFaultObserver;

impl FaultObserver for NoOpFaultObserver {
    fn on_fault(&self, _fault: &TaskFault) {}
}

/// An observer that logs faults using the tracing framework.
#[derive(Debug, Clone)]
pub struct LoggingFaultObserver {
    /// The log level to use.
    level: Level,
}

impl Default for LoggingFaultObserver {
    fn default() -> Self {
        Self { level: Level::WARN }
    }
}

impl LoggingFaultObserver {
    /// Creates a new logging observer with the specified level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Returns the configured level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }
}

impl FaultObserver for LoggingFaultObserver {
    fn on_fault(&self, fault: &TaskFault) {
        let kind = fault.kind.as_str();
        let label = fault.label.as_deref().unwrap_or("<unnamed>");
        match self.level {
            Level::ERROR => error!(kind, index = fault.index, label, "{}", fault),
            Level::WARN => warn!(kind, index = fault.index, label, "{}", fault),
            Level::INFO => info!(kind, index = fault.index, label, "{}", fault),
            _ => debug!(kind, index = fault.index, label, "{}", fault),
        }
    }
}

/// An observer that keeps every fault it sees.
#[derive(Debug, Default)]
pub struct CollectingFaultObserver {
    faults: RefCell<Vec<TaskFault>>,
}

impl CollectingFaultObserver {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the collected faults.
    #[must_use]
    pub fn faults(&self) -> Vec<TaskFault> {
        self.faults.borrow().clone()
    }

    /// Returns the number of collected faults.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faults.borrow().len()
    }

    /// Returns true if no fault was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faults.borrow().is_empty()
    }
}

impl FaultObserver for CollectingFaultObserver {
    fn on_fault(&self, fault: &TaskFault) {
        self.faults.borrow_mut().push(fault.clone());
    }
}

impl<F> FaultObserver for F
where
    F: Fn(&TaskFault),
{
    fn on_fault(&self, fault: &TaskFault) {
        self(fault);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskKind;

    #[test]
    fn test_collecting_observer() {
        let observer = CollectingFaultObserver::new();
        assert!(observer.is_empty());

        observer.on_fault(&TaskFault::new(TaskKind::Always, 0, "first"));
        observer.on_fault(&TaskFault::new(TaskKind::OnFailure, 1, "second"));

        assert_eq!(observer.len(), 2);
        assert_eq!(observer.faults()[1].message, "second");
    }

    #[test]
    fn test_logging_observer_does_not_panic() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let fault = TaskFault::new(TaskKind::OnSuccess, 0, "logged").with_label(Some("flush"));
        for level in [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG] {
            LoggingFaultObserver::new(level).on_fault(&fault);
        }
        assert_eq!(LoggingFaultObserver::default().level(), Level::WARN);
    }

    #[test]
    fn test_closure_observer() {
        let seen = RefCell::new(Vec::new());
        let observer = |fault: &TaskFault| seen.borrow_mut().push(fault.index);

        observer.on_fault(&TaskFault::new(TaskKind::Always, 4, "x"));
        assert_eq!(*seen.borrow(), vec![4]);
    }

    #[test]
    fn test_mock_observer() {
        let mut mock = MockFaultObserver::new();
        mock.expect_on_fault()
            .withf(|fault| fault.message == "expected")
            .times(1)
            .return_const(());

        mock.on_fault(&TaskFault::new(TaskKind::Always, 0, "expected"));
    }
}
