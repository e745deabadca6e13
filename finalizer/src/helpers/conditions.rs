//! Condition helpers over optional references.

/// Runs `action` with the current error state whenever `error` is present.
///
/// The action receives `None` when the referenced result holds no error.
pub fn always_with<E, F>(error: Option<&Option<E>>, action: F)
where
    F: FnOnce(Option<&E>),
{
    if let Some(error) = error {
        action(error.as_ref());
    }
}

/// Runs `action` with the error if `error` is present and holds one.
pub fn on_error<E, F>(error: Option<&Option<E>>, action: F)
where
    F: FnOnce(&E),
{
    if let Some(Some(error)) = error {
        action(error);
    }
}

/// Runs `action` if `error` is present and holds no error.
pub fn on_ok<E, F>(error: Option<&Option<E>>, action: F)
where
    F: FnOnce(),
{
    if let Some(None) = error {
        action();
    }
}

/// Runs `action` if `flag` is present and true.
pub fn on_true<F>(flag: Option<&bool>, action: F)
where
    F: FnOnce(),
{
    if flag == Some(&true) {
        action();
    }
}

/// Runs `action` if `flag` is present and false.
pub fn on_false<F>(flag: Option<&bool>, action: F)
where
    F: FnOnce(),
{
    if flag == Some(&false) {
        action();
    }
}

/// Takes the action out of `slot` and runs it, if both are present.
///
/// Returns true if an action ran. The slot is left empty afterwards.
pub fn exec_if_set<F>(slot: Option<&mut Option<F>>) -> bool
where
    F: FnOnce(),
{
    match slot.and_then(Option::take) {
        Some(action) => {
            action();
            true
        }
        None => false,
    }
}
