//! Finalizer configuration.

use crate::observer::FaultObserver;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// What happens to a task registered after finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateRegistration {
    /// Drop the task without running it (default).
    #[default]
    Discard,
    /// Panic at the registration call.
    Panic,
}

/// Configuration for a [`Finalizer`](crate::Finalizer).
#[derive(Clone, Default)]
pub struct FinalizerConfig {
    /// Policy for registrations after finalization.
    pub late_registration: LateRegistration,
    /// Receives caught task faults.
    pub observer: Option<Rc<dyn FaultObserver>>,
}

impl FinalizerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the late registration policy.
    #[must_use]
    pub fn with_late_registration(mut self, policy: LateRegistration) -> Self {
        self.late_registration = policy;
        self
    }

    /// Installs a fault observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Rc<dyn FaultObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Shorthand for rejecting late registrations.
    #[must_use]
    pub fn strict() -> Self {
        Self::new().with_late_registration(LateRegistration::Panic)
    }
}

impl fmt::Debug for FinalizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinalizerConfig")
            .field("late_registration", &self.late_registration)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoOpFaultObserver;

    #[test]
    fn test_default_config() {
        let config = FinalizerConfig::default();
        assert_eq!(config.late_registration, LateRegistration::Discard);
        assert!(config.observer.is_none());
    }

    #[test]
    fn test_builder() {
        let config = FinalizerConfig::strict().with_observer(Rc::new(NoOpFaultObserver));
        assert_eq!(config.late_registration, LateRegistration::Panic);
        assert!(config.observer.is_some());
        assert!(format!("{config:?}").contains("has_observer: true"));
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&LateRegistration::Panic).unwrap();
        assert_eq!(json, "\"panic\"");
        let back: LateRegistration = serde_json::from_str("\"discard\"").unwrap();
        assert_eq!(back, LateRegistration::Discard);
    }
}
