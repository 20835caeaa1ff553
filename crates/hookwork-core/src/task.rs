use std::future::Future;

use tokio::task::JoinHandle;

/// Spawns `fut` on the UI thread's local task set.
///
/// Views own `Rc` state, so their async work never leaves the thread. The
/// future resumes after the composition that spawned it has finished.
///
/// # Panics
///
/// Panics when called outside a `tokio::task::LocalSet`; platform runners
/// and test harnesses always compose inside one.
pub fn spawn<F>(fut: F) -> JoinHandle<F::Output>
where
    F: Future + 'static,
    F::Output: 'static,
{
    tokio::task::spawn_local(fut)
}
