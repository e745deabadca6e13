//! Scoped execution with automatic finalization.

use crate::config::FinalizerConfig;
use crate::finalizer::Finalizer;
use crate::slot::ErrorSlot;

/// Runs `body` with a fresh finalizer bound to its result.
///
/// An `Err` returned by `body` is stored in the slot before finalization, so
/// failure tasks see it. Tasks may replace or complement the error through
/// [`Finalizer::error_slot`]; whatever the slot holds afterwards is returned.
///
/// ```
/// use finalizer::{combine, guarded};
///
/// let result: Result<(), String> = guarded(|fin| {
///     let slot = fin.error_slot().unwrap();
///     fin.on_failure(move |_| slot.complement(combine::colon_join, "while saving".into()));
///     Err("disk full".to_string())
/// });
///
/// assert_eq!(result, Err("disk full:while saving".to_string()));
/// ```
pub fn guarded<'a, T, E, F>(body: F) -> Result<T, E>
where
    E: Clone,
    F: FnOnce(&mut Finalizer<'a, E>) -> Result<T, E>,
{
    guarded_with(FinalizerConfig::default(), body)
}

/// Like [`guarded`], with an explicit configuration.
pub fn guarded_with<'a, T, E, F>(config: FinalizerConfig, body: F) -> Result<T, E>
where
    E: Clone,
    F: FnOnce(&mut Finalizer<'a, E>) -> Result<T, E>,
{
    let slot = ErrorSlot::new();
    let mut fin = Finalizer::with_config(Some(&slot), config);

    let outcome = body(&mut fin);
    if let Err(error) = &outcome {
        slot.set(error.clone());
    }
    fin.finalize();

    match (outcome, slot.get()) {
        (_, Some(error)) => Err(error),
        (outcome, None) => outcome,
    }
}
