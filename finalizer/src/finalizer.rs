//! The finalizer: a registry of conditional cleanup tasks and its run algorithm.

use crate::config::{FinalizerConfig, LateRegistration};
use crate::errors::TaskFault;
use crate::report::{FinalizeReport, Outcome};
use crate::slot::ErrorSlot;
use crate::task::{run_isolated, Entry, FailureTask, Task, TaskKind};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, trace};

/// Conditional cleanup tasks for one function activation.
///
/// Tasks are registered in three sequences: `always`, `on_success` and
/// `on_failure`. Finalization runs `always` first, then exactly one of the
/// conditional sequences depending on whether the bound [`ErrorSlot`] holds an
/// error. Each sequence runs last-registered first. A panicking task is
/// isolated and never stops the others.
///
/// Finalization happens at most once: on an explicit [`finalize`] call or
/// when the finalizer is dropped, whichever comes first. A finalizer dropped
/// while the thread is panicking never runs `on_success` tasks; with an empty
/// slot only `always` tasks run.
///
/// Caught task panics are not propagated, but the process panic hook still
/// reports each one (by default to stderr) before the finalizer catches it.
///
/// ```
/// use finalizer::{ErrorSlot, Finalizer};
///
/// fn transfer(fail: bool) -> Result<u32, String> {
///     let err = ErrorSlot::new();
///     let mut fin = Finalizer::bound(&err);
///     fin.on_failure(|e: &String| eprintln!("rolling back: {e}"));
///     fin.on_success(|| println!("committed"));
///     fin.always(|| println!("connection released"));
///
///     if fail {
///         err.set("insufficient funds".to_string());
///     }
///     fin.finalize();
///     err.into_result(42)
/// }
///
/// assert_eq!(transfer(false), Ok(42));
/// assert!(transfer(true).is_err());
/// ```
///
/// [`finalize`]: Finalizer::finalize
pub struct Finalizer<'a, E: Clone> {
    /// Set once, before the first task runs.
    finalized: bool,
    on_failure: Vec<Entry<FailureTask<'a, E>>>,
    on_success: Vec<Entry<Task<'a>>>,
    always: Vec<Entry<Task<'a>>>,
    /// The caller's error slot, if bound.
    slot: Option<ErrorSlot<E>>,
    config: FinalizerConfig,
}

impl<'a, E: Clone> Finalizer<'a, E> {
    /// Creates a finalizer, optionally bound to `slot`.
    #[must_use]
    pub fn new(slot: Option<&ErrorSlot<E>>) -> Self {
        Self::with_config(slot, FinalizerConfig::default())
    }

    /// Creates a finalizer bound to `slot`.
    #[must_use]
    pub fn bound(slot: &ErrorSlot<E>) -> Self {
        Self::new(Some(slot))
    }

    /// Creates a finalizer with no error slot.
    ///
    /// Only `always` tasks will ever run.
    #[must_use]
    pub fn unbound() -> Self {
        Self::new(None)
    }

    /// Creates a finalizer with an explicit configuration.
    #[must_use]
    pub fn with_config(slot: Option<&ErrorSlot<E>>, config: FinalizerConfig) -> Self {
        Self {
            finalized: false,
            on_failure: Vec::new(),
            on_success: Vec::new(),
            always: Vec::new(),
            slot: slot.cloned(),
            config,
        }
    }

    /// Registers a task that runs only if the slot holds an error.
    ///
    /// The task receives the error held at the moment it starts.
    pub fn on_failure<F>(&mut self, task: F) -> &mut Self
    where
        F: FnOnce(&E) + 'a,
    {
        self.push_failure(task, None)
    }

    /// Registers a labelled failure task.
    pub fn on_failure_named<F>(&mut self, name: &str, task: F) -> &mut Self
    where
        F: FnOnce(&E) + 'a,
    {
        self.push_failure(task, Some(name))
    }

    /// Registers a task that runs only if the slot is empty.
    pub fn on_success<F>(&mut self, task: F) -> &mut Self
    where
        F: FnOnce() + 'a,
    {
        if self.accepts(TaskKind::OnSuccess) {
            self.on_success.push(Entry::new(Box::new(task), None));
        }
        self
    }

    /// Registers a labelled success task.
    pub fn on_success_named<F>(&mut self, name: &str, task: F) -> &mut Self
    where
        F: FnOnce() + 'a,
    {
        if self.accepts(TaskKind::OnSuccess) {
            self.on_success.push(Entry::new(Box::new(task), Some(name)));
        }
        self
    }

    /// Registers a task that runs on every finalization.
    pub fn always<F>(&mut self, task: F) -> &mut Self
    where
        F: FnOnce() + 'a,
    {
        if self.accepts(TaskKind::Always) {
            self.always.push(Entry::new(Box::new(task), None));
        }
        self
    }

    /// Registers a labelled unconditional task.
    pub fn always_named<F>(&mut self, name: &str, task: F) -> &mut Self
    where
        F: FnOnce() + 'a,
    {
        if self.accepts(TaskKind::Always) {
            self.always.push(Entry::new(Box::new(task), Some(name)));
        }
        self
    }

    fn push_failure<F>(&mut self, task: F, name: Option<&str>) -> &mut Self
    where
        F: FnOnce(&E) + 'a,
    {
        if self.accepts(TaskKind::OnFailure) {
            self.on_failure.push(Entry::new(Box::new(task), name));
        }
        self
    }

    fn accepts(&self, kind: TaskKind) -> bool {
        if !self.finalized {
            return true;
        }
        match self.config.late_registration {
            LateRegistration::Discard => {
                debug!(kind = %kind, "Discarding task registered after finalization");
                false
            }
            LateRegistration::Panic => {
                panic!("{kind} task registered after finalization")
            }
        }
    }

    /// Runs the applicable tasks. Later calls do nothing.
    pub fn finalize(&mut self) {
        let _ = self.run(false);
    }

    /// Runs the applicable tasks and describes what happened.
    ///
    /// Returns `None` if the finalizer had already been finalized.
    pub fn finalize_report(&mut self) -> Option<FinalizeReport> {
        self.run(false)
    }

    fn run(&mut self, unwinding: bool) -> Option<FinalizeReport> {
        if self.finalized {
            return None;
        }
        self.finalized = true;

        let started = Instant::now();
        let always = std::mem::take(&mut self.always);
        let on_success = std::mem::take(&mut self.on_success);
        let on_failure = std::mem::take(&mut self.on_failure);
        trace!(
            always = always.len(),
            on_success = on_success.len(),
            on_failure = on_failure.len(),
            "Finalizing"
        );

        let mut executed = 0;
        let mut faults = Vec::new();

        for (index, Entry { task, label }) in always.into_iter().enumerate().rev() {
            executed += 1;
            if let Err(fault) = run_isolated(TaskKind::Always, index, label.as_deref(), task) {
                self.observe(fault, &mut faults);
            }
        }

        let outcome = match self.slot.clone() {
            None => Outcome::Unbound,
            Some(slot) if slot.is_failure() => {
                for (index, Entry { task, label }) in on_failure.into_iter().enumerate().rev() {
                    let Some(current) = slot.get() else { break };
                    executed += 1;
                    let invoke = || task(&current);
                    if let Err(fault) =
                        run_isolated(TaskKind::OnFailure, index, label.as_deref(), invoke)
                    {
                        self.observe(fault, &mut faults);
                    }
                }
                Outcome::Failure
            }
            Some(_) if unwinding => Outcome::Unwinding,
            Some(_) => {
                for (index, Entry { task, label }) in on_success.into_iter().enumerate().rev() {
                    executed += 1;
                    if let Err(fault) =
                        run_isolated(TaskKind::OnSuccess, index, label.as_deref(), task)
                    {
                        self.observe(fault, &mut faults);
                    }
                }
                Outcome::Success
            }
        };

        let mut report = FinalizeReport::new(outcome);
        report.executed = executed;
        report.faults = faults;
        report.duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        debug!(
            outcome = %report.outcome,
            executed = report.executed,
            faults = report.faults.len(),
            duration_ms = report.duration_ms,
            "Finalized"
        );
        Some(report)
    }

    fn observe(&self, fault: TaskFault, faults: &mut Vec<TaskFault>) {
        if let Some(observer) = &self.config.observer {
            let _ = catch_unwind(AssertUnwindSafe(|| observer.on_fault(&fault)));
        }
        faults.push(fault);
    }

    /// Returns the current error, or `None` if the slot is empty or unbound.
    #[must_use]
    pub fn get_error(&self) -> Option<E> {
        self.slot.as_ref().and_then(ErrorSlot::get)
    }

    /// Overwrites the bound slot. No-op when unbound.
    pub fn set_error(&self, error: E) {
        if let Some(slot) = &self.slot {
            slot.set(error);
        }
    }

    /// Combines `new` into the existing error, or stores it if there is none.
    ///
    /// No-op when unbound.
    pub fn complement_error<F>(&self, combine: F, new: E)
    where
        F: FnOnce(E, E) -> E,
    {
        if let Some(slot) = &self.slot {
            slot.complement(combine, new);
        }
    }

    /// Returns a handle to the bound slot, for use inside registered tasks.
    #[must_use]
    pub fn error_slot(&self) -> Option<ErrorSlot<E>> {
        self.slot.clone()
    }

    /// Returns true if an error slot is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.slot.is_some()
    }

    /// Returns true once finalization has started.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Returns the number of registered tasks that have not run yet.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.always.len() + self.on_success.len() + self.on_failure.len()
    }
}

impl<E: Clone> Default for Finalizer<'_, E> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<E: Clone> Drop for Finalizer<'_, E> {
    fn drop(&mut self) {
        let _ = self.run(std::thread::panicking());
    }
}

impl<E: Clone> fmt::Debug for Finalizer<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finalizer")
            .field("finalized", &self.finalized)
            .field("bound", &self.is_bound())
            .field("always", &self.always.len())
            .field("on_success", &self.on_success.len())
            .field("on_failure", &self.on_failure.len())
            .field("config", &self.config)
            .finish()
    }
}
