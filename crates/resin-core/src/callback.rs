// Completion-callback adapter for callers that do not await.

use std::future::Future;

use tokio::task::JoinHandle;

/// Run `future` on the current Tokio runtime and hand its result to
/// `callback` exactly once.
///
/// Must be called from within a runtime.
///
/// ```no_run
/// # async fn run(resin: resin_core::Resin) {
/// let devices = resin.devices();
/// resin_core::spawn_with_callback(
///     async move { devices.get_all().await },
///     |result| match result {
///         Ok(devices) => println!("{} devices", devices.len()),
///         Err(e) => eprintln!("error: {e}"),
///     },
/// );
/// # }
/// ```
pub fn spawn_with_callback<F, T, E, C>(future: F, callback: C) -> JoinHandle<()>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    C: FnOnce(Result<T, E>) + Send + 'static,
{
    tokio::spawn(async move {
        callback(future.await);
    })
}
