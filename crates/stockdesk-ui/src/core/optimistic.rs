//! Apply a local change before the server confirms it.

use std::future::Future;

/// Snapshot `state`, apply `change`, then run `attempt`. When the attempt fails
/// the snapshot is put back, so the caller sees either the confirmed change or
/// the original state.
///
/// # Errors
///
/// Returns the attempt's error after restoring the snapshot.
pub async fn optimistic<S, T, E, F, Fut>(
    state: &mut S,
    change: impl FnOnce(&mut S),
    attempt: F,
) -> Result<T, E>
where
    S: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let snapshot = state.clone();
    change(state);
    match attempt().await {
        Ok(value) => Ok(value),
        Err(err) => {
            *state = snapshot;
            Err(err)
        }
    }
}
